//! # Todo Form Core
//!
//! Core traits and types for the todo creation form.
//!
//! The form is written as a reducer: a pure function from the current form
//! state and an input action to the new state plus a list of effect
//! descriptions. Everything that touches the outside world (handing a
//! finished todo to a store) is expressed as an [`effect::Effect`] and
//! executed by the runtime.
//!
//! ## Core Concepts
//!
//! - **State**: the form's local state (a single text field)
//! - **Action**: every input the form reacts to (keystrokes, submissions, feedback)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a side effect description, not its execution
//! - **Environment**: injected capabilities, most importantly a [`environment::Dispatch`] sink
//!
//! ## Example
//!
//! ```ignore
//! use todo_form_core::*;
//!
//! impl Reducer for TodoFormReducer {
//!     type State = FormState;
//!     type Action = FormAction;
//!     type Environment = TodoFormEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut FormState,
//!         action: FormAction,
//!         env: &TodoFormEnvironment,
//!     ) -> SmallVec<[Effect<FormAction>; 4]> {
//!         match action {
//!             FormAction::ChangeText { value } => {
//!                 state.text = value;
//!                 SmallVec::new()
//!             }
//!             // ...
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for form logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They are deterministic and testable without a runtime.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for component logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for CounterReducer {
    ///     type State = CounterState;
    ///     type Action = CounterAction;
    ///     type Environment = ();
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut CounterState,
    ///         action: CounterAction,
    ///         _env: &(),
    ///     ) -> SmallVec<[Effect<CounterAction>; 4]> {
    ///         state.count += 1;
    ///         SmallVec::new()
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates state in place and returns the effects the runtime should
        /// execute. Most reductions return zero or one effect, so the result
        /// is stored inline.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values returned by reducers and executed by the runtime.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation as an effect
        #[must_use]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External collaborators are abstracted behind traits and injected via the
/// reducer's Environment parameter.
pub mod environment {
    use std::future::Future;
    use std::pin::Pin;
    use thiserror::Error;

    /// Errors a dispatch sink can report back to the caller.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum DispatchError {
        /// The receiving store refused the value
        #[error("Dispatch rejected: {0}")]
        Rejected(String),

        /// The receiving store is gone or shutting down
        #[error("Dispatch target unavailable: {0}")]
        Unavailable(String),
    }

    /// A capability that accepts a value and hands it to an external system.
    ///
    /// This is the only thing a component needs from a state container: a
    /// callable that takes a value and returns nothing meaningful. Components
    /// receive exactly this capability, never the whole store.
    ///
    /// # Dyn Compatibility
    ///
    /// Uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn` so
    /// the trait can be held as `Arc<dyn Dispatch<T>>` inside an environment
    /// and captured by effects.
    ///
    /// # Example
    ///
    /// ```ignore
    /// struct PrintDispatch;
    ///
    /// impl Dispatch<String> for PrintDispatch {
    ///     fn dispatch(
    ///         &self,
    ///         value: String,
    ///     ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
    ///         Box::pin(async move {
    ///             println!("{value}");
    ///             Ok(())
    ///         })
    ///     }
    /// }
    /// ```
    pub trait Dispatch<T>: Send + Sync {
        /// Hand `value` to the receiver.
        ///
        /// # Errors
        ///
        /// Returns a [`DispatchError`] when the receiver cannot accept the value.
        fn dispatch(
            &self,
            value: T,
        ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>>;
    }

    impl<T, D> Dispatch<T> for std::sync::Arc<D>
    where
        D: Dispatch<T> + ?Sized,
    {
        fn dispatch(
            &self,
            value: T,
        ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
            (**self).dispatch(value)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Dispatch, DispatchError};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    struct Collect(Mutex<Vec<String>>);

    impl Dispatch<String> for Collect {
        fn dispatch(
            &self,
            value: String,
        ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
            Box::pin(async move {
                self.0
                    .lock()
                    .map_err(|e| DispatchError::Unavailable(e.to_string()))?
                    .push(value);
                Ok(())
            })
        }
    }

    #[test]
    fn effect_debug_hides_future() {
        let effect: Effect<u8> = Effect::future(async { Some(1) });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[tokio::test]
    async fn dispatch_through_arc() {
        let sink = Arc::new(Collect(Mutex::new(Vec::new())));
        let shared: Arc<dyn Dispatch<String>> = sink.clone();

        shared.dispatch("buy milk".to_string()).await.unwrap();

        assert_eq!(*sink.0.lock().unwrap(), vec!["buy milk".to_string()]);
    }

    #[test]
    fn dispatch_error_messages() {
        assert_eq!(
            DispatchError::Rejected("closed".into()).to_string(),
            "Dispatch rejected: closed"
        );
        assert_eq!(
            DispatchError::Unavailable("gone".into()).to_string(),
            "Dispatch target unavailable: gone"
        );
    }
}
