//! Reducer for the todo form.
//!
//! Keystrokes replace the local text. A submission suppresses the host's
//! default behavior, snapshots the state for the sink, applies the submit
//! policy and returns a single effect that performs the dispatch.

use crate::config::{FormConfig, SubmitPolicy};
use crate::types::{FormAction, FormState};
use std::sync::Arc;
use todo_form_core::environment::Dispatch;
use todo_form_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment for the todo form reducer
#[derive(Clone)]
pub struct TodoFormEnvironment {
    /// Receiver of submitted form states
    pub sink: Arc<dyn Dispatch<FormState>>,
    /// Form configuration
    pub config: FormConfig,
}

impl TodoFormEnvironment {
    /// Creates a new `TodoFormEnvironment`
    #[must_use]
    pub fn new(sink: Arc<dyn Dispatch<FormState>>, config: FormConfig) -> Self {
        Self { sink, config }
    }
}

impl std::fmt::Debug for TodoFormEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoFormEnvironment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reducer for the todo form
#[derive(Clone, Debug, Default)]
pub struct TodoFormReducer;

impl TodoFormReducer {
    /// Creates a new `TodoFormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoFormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = TodoFormEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::ChangeText { value } => {
                state.text = value;
                state.last_error = None;
                SmallVec::new()
            },

            FormAction::Submit { event } => {
                event.prevent_default();
                state.last_error = None;

                if env.config.reject_empty && state.is_empty() {
                    tracing::debug!("Ignoring submission of empty input");
                    return SmallVec::new();
                }

                let submitted = FormState::with_text(state.text.clone());

                if env.config.submit_policy == SubmitPolicy::ResetText {
                    state.text.clear();
                }

                metrics::counter!("todo_form.submissions").increment(1);
                tracing::debug!(len = submitted.text.len(), "Submitting form");

                let sink = Arc::clone(&env.sink);
                smallvec![Effect::future(async move {
                    match sink.dispatch(submitted).await {
                        Ok(()) => None,
                        Err(error) => {
                            tracing::warn!(error = %error, "Sink refused submission");
                            metrics::counter!("todo_form.dispatch_failures").increment(1);
                            Some(FormAction::DispatchFailed { error })
                        },
                    }
                })]
            },

            FormAction::DispatchFailed { error } => {
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
