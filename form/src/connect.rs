//! Binding the form to a host store.
//!
//! [`bind_add_todo`] produces the pre-bound `addTodo` capability: it accepts a
//! submitted [`FormState`], wraps it in `ADD_TODO` and sends it to the host
//! store. [`StoreDispatch`] exposes a store's raw dispatch for use with
//! [`DirectDispatch`](crate::sink::DirectDispatch). The form never sees the
//! store itself.
//!
//! [`ActionLogReducer`] is a minimal host that records every action it
//! receives, enough to run the form end to end.

use crate::types::{FormState, TodoAction};
use std::future::Future;
use std::pin::Pin;
use todo_form_core::environment::{Dispatch, DispatchError};
use todo_form_core::{SmallVec, effect::Effect, reducer::Reducer};
use todo_form_macros::Action;
use todo_form_runtime::{Store, StoreError};

fn unavailable(error: &StoreError) -> DispatchError {
    DispatchError::Unavailable(error.to_string())
}

/// Pre-bound `addTodo` for a host store
///
/// Created by [`bind_add_todo`].
pub struct ConnectedAddTodo<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    store: Store<S, A, E, R>,
}

/// Binds `addTodo` to `store`
///
/// The host action type only needs a conversion from [`TodoAction`].
#[must_use]
pub fn bind_add_todo<S, A, E, R>(store: &Store<S, A, E, R>) -> ConnectedAddTodo<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    ConnectedAddTodo {
        store: store.clone(),
    }
}

impl<S, A, E, R> Dispatch<FormState> for ConnectedAddTodo<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: From<TodoAction> + Send + Sync + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn dispatch(
        &self,
        value: FormState,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
        Box::pin(async move {
            self.store
                .send(A::from(TodoAction::add_todo(value)))
                .await
                .map(|_| ())
                .map_err(|e| unavailable(&e))
        })
    }
}

/// A host store's raw dispatch for [`TodoAction`]s
pub struct StoreDispatch<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    store: Store<S, A, E, R>,
}

impl<S, A, E, R> StoreDispatch<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    /// Creates a dispatcher sending to `store`
    #[must_use]
    pub fn new(store: &Store<S, A, E, R>) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

impl<S, A, E, R> Dispatch<TodoAction> for StoreDispatch<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: From<TodoAction> + Send + Sync + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn dispatch(
        &self,
        value: TodoAction,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
        Box::pin(async move {
            self.store
                .send(A::from(value))
                .await
                .map(|_| ())
                .map_err(|e| unavailable(&e))
        })
    }
}

/// State of the action-log host
#[derive(Clone, Debug, Default)]
pub struct ActionLogState {
    /// Every action received, in order
    pub actions: Vec<TodoAction>,
}

/// Actions of the action-log host
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum ActionLogAction {
    /// Event: an action arrived from a bound component
    #[event]
    Received(TodoAction),
}

impl From<TodoAction> for ActionLogAction {
    fn from(action: TodoAction) -> Self {
        Self::Received(action)
    }
}

/// Host reducer that appends every received action to the log
#[derive(Clone, Debug, Default)]
pub struct ActionLogReducer;

impl Reducer for ActionLogReducer {
    type State = ActionLogState;
    type Action = ActionLogAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ActionLogAction::Received(action) => {
                tracing::info!(action_type = action.action_type(), "Host received action");
                state.actions.push(action);
            },
        }
        SmallVec::new()
    }
}

/// A store running the action-log host
pub type ActionLogStore = Store<ActionLogState, ActionLogAction, (), ActionLogReducer>;

/// Creates an empty action-log host store
#[must_use]
pub fn action_log_store() -> ActionLogStore {
    Store::new(ActionLogState::default(), ActionLogReducer, ())
}
