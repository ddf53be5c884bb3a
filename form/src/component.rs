//! The todo creation form as a mounted component.
//!
//! [`TodoForm`] owns a [`Store`] running [`TodoFormReducer`] and turns user
//! gestures into actions. It holds nothing but the store and its
//! configuration; all behavior lives in the reducer.

use crate::config::FormConfig;
use crate::error::FormError;
use crate::reducer::{TodoFormEnvironment, TodoFormReducer};
use crate::types::{FormAction, FormState, SubmitEvent};
use crate::view::{FormView, render};
use std::sync::Arc;
use todo_form_core::environment::Dispatch;
use todo_form_runtime::{EffectHandle, Store, StoreError};

/// Store running the form reducer
pub type FormStore = Store<FormState, FormAction, TodoFormEnvironment, TodoFormReducer>;

/// A mounted todo creation form
#[derive(Clone)]
pub struct TodoForm {
    store: FormStore,
    config: FormConfig,
}

impl TodoForm {
    /// Mounts a form with an empty input, submitting to `sink`
    #[must_use]
    pub fn mount(config: FormConfig, sink: Arc<dyn Dispatch<FormState>>) -> Self {
        tracing::debug!(
            label = %config.label,
            policy = ?config.submit_policy,
            "Mounting todo form"
        );

        let environment = TodoFormEnvironment::new(sink, config.clone());
        let store = Store::new(FormState::new(), TodoFormReducer::new(), environment);

        Self { store, config }
    }

    /// Replaces the input with `value`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after unmount began.
    pub async fn on_change_text(&self, value: impl Into<String>) -> Result<(), StoreError> {
        self.store
            .send(FormAction::ChangeText {
                value: value.into(),
            })
            .await
            .map(|_| ())
    }

    /// Handles a submission gesture raised by the host
    ///
    /// The returned handle completes once the sink call finished.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after unmount began.
    pub async fn submit(&self, event: SubmitEvent) -> Result<EffectHandle, StoreError> {
        self.store.send(FormAction::Submit { event }).await
    }

    /// Submits the form and waits for the sink call to finish
    ///
    /// Returns the submission gesture so the caller can observe that its
    /// default behavior was suppressed. A sink failure is returned to the
    /// caller as is; the form does not retry and does not restore the text.
    ///
    /// # Errors
    ///
    /// - [`FormError::Dispatch`] when the sink refused the submission
    /// - [`FormError::Store`] after unmount began
    pub async fn on_submit(&self) -> Result<SubmitEvent, FormError> {
        let event = SubmitEvent::new();
        let mut handle = self.submit(event.clone()).await?;
        handle.wait().await;

        match self.store.state(|s| s.last_error.clone()).await {
            Some(error) => Err(FormError::Dispatch(error)),
            None => Ok(event),
        }
    }

    /// Current content of the input
    pub async fn text(&self) -> String {
        self.store.state(|s| s.text.clone()).await
    }

    /// Snapshot of the form state
    pub async fn state(&self) -> FormState {
        self.store.state(FormState::clone).await
    }

    /// Renders the form from its current state
    pub async fn view(&self) -> FormView {
        self.store.state(|s| render(s, &self.config)).await
    }

    /// Form configuration
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Unmounts the form, waiting for in-flight sink calls
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if sink calls are still
    /// running after the configured shutdown timeout.
    pub async fn unmount(self) -> Result<(), StoreError> {
        tracing::debug!("Unmounting todo form");
        self.store.shutdown(self.config.shutdown_timeout()).await
    }
}

impl std::fmt::Debug for TodoForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoForm")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
