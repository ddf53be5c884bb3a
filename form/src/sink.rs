//! Sinks that wrap a submitted form state into an `ADD_TODO` action.

use crate::types::{FormState, TodoAction};
use std::future::Future;
use std::pin::Pin;
use todo_form_core::environment::{Dispatch, DispatchError};

/// Wraps each submission into [`TodoAction::AddTodo`] and hands it to an
/// action dispatcher.
///
/// Use this when the form is given a store's raw dispatch instead of a
/// pre-bound `ADD_TODO` creator.
#[derive(Debug, Clone)]
pub struct DirectDispatch<D> {
    inner: D,
}

impl<D> DirectDispatch<D>
where
    D: Dispatch<TodoAction>,
{
    /// Creates a sink around `inner`
    #[must_use]
    pub const fn new(inner: D) -> Self {
        Self { inner }
    }

    /// The wrapped dispatcher
    #[must_use]
    pub const fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D> Dispatch<FormState> for DirectDispatch<D>
where
    D: Dispatch<TodoAction>,
{
    fn dispatch(
        &self,
        value: FormState,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
        tracing::trace!("Wrapping submission in ADD_TODO");
        self.inner.dispatch(TodoAction::add_todo(value))
    }
}
