//! Rendered surface of the form: one labeled text input and a submit control.

use crate::config::FormConfig;
use crate::types::FormState;
use serde::Serialize;
use std::fmt;

/// Caption of the submit control
pub const SUBMIT_CAPTION: &str = "Submit";

/// Everything the form displays
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Label of the input
    pub label: String,
    /// The text input
    pub input: TextInput,
    /// The submit control
    pub submit: SubmitControl,
    /// Last sink failure, shown under the form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A single-line controlled text input
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextInput {
    /// Displayed value, always taken from the form state
    pub value: String,
}

/// The submit control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    /// Caption shown on the control
    pub caption: &'static str,
}

/// Derives the view from the current state
#[must_use]
pub fn render(state: &FormState, config: &FormConfig) -> FormView {
    FormView {
        label: config.label.clone(),
        input: TextInput {
            value: state.text.clone(),
        },
        submit: SubmitControl {
            caption: SUBMIT_CAPTION,
        },
        error: state.last_error.as_ref().map(ToString::to_string),
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: [{}] [{}]",
            self.label, self.input.value, self.submit.caption
        )?;
        if let Some(error) = &self.error {
            write!(f, " ! {error}")?;
        }
        Ok(())
    }
}
