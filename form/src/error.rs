//! Errors surfaced to the host of a mounted form.

use thiserror::Error;
use todo_form_core::environment::DispatchError;
use todo_form_runtime::StoreError;

/// Errors returned by [`TodoForm`](crate::TodoForm) operations
#[derive(Error, Debug)]
pub enum FormError {
    /// The form's store refused the input (unmounted or unmounting)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The sink did not accept the submitted todo
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
