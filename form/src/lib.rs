//! # Todo Form
//!
//! A form that collects a line of text and submits it as a new todo.
//!
//! This crate showcases:
//! - Controlled input: the displayed value is always derived from state
//! - Capability injection: the form receives a `Dispatch<FormState>`, never a store
//! - Effects: the sink is called from an `Effect::Future`, not from the reducer
//! - Two ways to obtain the sink: a store's raw dispatch wrapped by
//!   [`DirectDispatch`], or an `addTodo` pre-bound with [`bind_add_todo`]
//!
//! ## Architecture
//!
//! ```text
//! keystroke ──ChangeText──▶ TodoFormReducer ──▶ FormState { text }
//! submit ─────Submit──────▶ TodoFormReducer ──▶ Effect::Future ──▶ sink(FormState)
//!                                                                  │
//!                                      host store ◀── ADD_TODO ────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_form::{FormConfig, TodoForm, action_log_store, bind_add_todo};
//!
//! # async fn example() -> Result<(), todo_form::FormError> {
//! let host = action_log_store();
//! let form = TodoForm::mount(FormConfig::default(), Arc::new(bind_add_todo(&host)));
//!
//! form.on_change_text("buy milk").await?;
//! form.on_submit().await?;
//!
//! assert_eq!(form.text().await, "");
//! assert_eq!(host.state(|s| s.actions.len()).await, 1);
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod config;
pub mod connect;
pub mod error;
pub mod reducer;
pub mod sink;
pub mod types;
pub mod view;

pub use component::{FormStore, TodoForm};
pub use config::{ConfigError, FormConfig, SubmitPolicy};
pub use connect::{
    ActionLogAction, ActionLogReducer, ActionLogState, ActionLogStore, ConnectedAddTodo,
    StoreDispatch, action_log_store, bind_add_todo,
};
pub use error::FormError;
pub use reducer::{TodoFormEnvironment, TodoFormReducer};
pub use sink::DirectDispatch;
pub use types::{EnvelopeShape, FormAction, FormPhase, FormState, SubmitEvent, TodoAction};
pub use view::{FormView, render};
