//! Domain types for the todo creation form.
//!
//! The form owns a single piece of local state, the text currently in its
//! input. Submitting hands a snapshot of that state to an external sink, which
//! turns it into an `ADD_TODO` action for whatever store sits behind it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_form_core::environment::DispatchError;
use todo_form_macros::Action;

/// Local state of the form
///
/// Created empty on mount, replaced wholesale on every keystroke, and reset
/// after a submission when the reset policy is active. Serializes as
/// `{"text": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Current content of the input
    pub text: String,
    /// Failure reported by the sink for the last submission, if any
    #[serde(skip)]
    pub last_error: Option<DispatchError>,
}

impl FormState {
    /// Creates the state of a freshly mounted form
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            last_error: None,
        }
    }

    /// Creates a state holding `text`
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            last_error: None,
        }
    }

    /// Returns true when the input holds no text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the logical phase of the form
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        if self.is_empty() {
            FormPhase::Empty
        } else {
            FormPhase::NonEmpty
        }
    }
}

/// The two logical states of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    /// The input holds `""`
    Empty,
    /// The input holds some text
    NonEmpty,
}

/// Outbound action produced once per submission
///
/// Canonical wire shape: `{"type":"ADD_TODO","payload":{"text":"..."}}`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Add a todo carrying the submitted form state
    AddTodo(FormState),
}

impl TodoAction {
    /// Wraps a submitted form state in an `ADD_TODO` action
    #[must_use]
    pub const fn add_todo(form: FormState) -> Self {
        Self::AddTodo(form)
    }

    /// The form state carried by this action
    #[must_use]
    pub const fn form(&self) -> &FormState {
        match self {
            Self::AddTodo(form) => form,
        }
    }

    /// Serializes the action using the given envelope shape
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error if the payload cannot be encoded.
    pub fn to_json(&self, shape: EnvelopeShape) -> serde_json::Result<serde_json::Value> {
        match shape {
            EnvelopeShape::Payload => serde_json::to_value(self),
            EnvelopeShape::Todo => serde_json::to_value(TodoKeyEnvelope {
                kind: self.action_type(),
                todo: self.form(),
            }),
        }
    }
}

/// `{type, todo}` rendering of an action
#[derive(Serialize)]
struct TodoKeyEnvelope<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    todo: &'a FormState,
}

/// Key under which the form state travels in a serialized action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeShape {
    /// `{"type":"ADD_TODO","payload":{...}}`
    #[default]
    Payload,
    /// `{"type":"ADD_TODO","todo":{...}}`, the shape of direct store dispatch
    Todo,
}

impl FromStr for EnvelopeShape {
    type Err = crate::config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payload" => Ok(Self::Payload),
            "todo" => Ok(Self::Todo),
            other => Err(crate::config::ConfigError::UnknownValue {
                key: "envelope",
                value: other.to_string(),
            }),
        }
    }
}

/// A submission gesture
///
/// Carries the host's default behavior for the gesture (a page reload for a
/// browser form). The form always suppresses it. Clones share the flag, so
/// the host keeps one clone and checks it after the form handled the event.
#[derive(Clone, Default)]
pub struct SubmitEvent {
    default_prevented: Arc<AtomicBool>,
}

impl SubmitEvent {
    /// Creates a fresh submission gesture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the host's default behavior for this gesture
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    /// Returns true once `prevent_default` was called
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for SubmitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitEvent")
            .field("default_prevented", &self.default_prevented())
            .finish()
    }
}

/// Inputs the form reacts to
#[derive(Action, Clone, Debug)]
pub enum FormAction {
    // ========== Commands ==========
    /// Command: the input now holds `value`
    #[command]
    ChangeText {
        /// Full content of the input after the keystroke
        value: String,
    },

    /// Command: the user submitted the form
    #[command]
    Submit {
        /// The submission gesture
        event: SubmitEvent,
    },

    // ========== Events ==========
    /// Event: the sink refused the last submission
    #[event]
    DispatchFailed {
        /// Error reported by the sink
        error: DispatchError,
    },
}
