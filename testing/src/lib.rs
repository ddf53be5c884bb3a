//! # Todo Form Testing
//!
//! Testing utilities and helpers for the todo form.
//!
//! This crate provides:
//! - Mock dispatch sinks that record or reject what they receive
//! - A Given-When-Then builder for reducers ([`ReducerTest`])
//! - Effect assertions and an in-place effect runner
//! - proptest strategies for typed input
//!
//! ## Example
//!
//! ```ignore
//! use todo_form_testing::mocks::RecordingDispatch;
//!
//! #[tokio::test]
//! async fn submits_typed_text() {
//!     let sink = RecordingDispatch::new();
//!     let form = TodoForm::mount(FormConfig::default(), Arc::new(sink.clone()));
//!
//!     form.on_change_text("buy milk").await?;
//!     form.on_submit().await?;
//!
//!     assert_eq!(sink.received(), vec![FormState::with_text("buy milk")]);
//! }
//! ```


pub use reducer_test::{ReducerTest, assertions, run_effects};

/// Mock implementations of environment capabilities
pub mod mocks {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};
    use todo_form_core::environment::{Dispatch, DispatchError};

    /// Dispatch sink that records every value it receives
    ///
    /// Clones share the same recording, so a test can keep one clone and
    /// hand another to the code under test.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_form_testing::mocks::RecordingDispatch;
    /// use todo_form_core::environment::Dispatch;
    ///
    /// # async fn example() {
    /// let sink: RecordingDispatch<String> = RecordingDispatch::new();
    /// sink.dispatch("buy milk".to_string()).await.ok();
    /// assert_eq!(sink.received(), vec!["buy milk".to_string()]);
    /// # }
    /// ```
    #[derive(Debug)]
    pub struct RecordingDispatch<T> {
        received: Arc<Mutex<Vec<T>>>,
    }

    impl<T> RecordingDispatch<T> {
        /// Create an empty recording sink
        #[must_use]
        pub fn new() -> Self {
            Self {
                received: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Number of values received so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.received.lock().map_or(0, |values| values.len())
        }
    }

    impl<T: Clone> RecordingDispatch<T> {
        /// Snapshot of every value received, in order
        #[must_use]
        pub fn received(&self) -> Vec<T> {
            self.received
                .lock()
                .map(|values| values.clone())
                .unwrap_or_default()
        }
    }

    impl<T> Clone for RecordingDispatch<T> {
        fn clone(&self) -> Self {
            Self {
                received: Arc::clone(&self.received),
            }
        }
    }

    impl<T> Default for RecordingDispatch<T> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T: Send + 'static> Dispatch<T> for RecordingDispatch<T> {
        fn dispatch(
            &self,
            value: T,
        ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
            Box::pin(async move {
                self.received
                    .lock()
                    .map_err(|e| DispatchError::Unavailable(e.to_string()))?
                    .push(value);
                Ok(())
            })
        }
    }

    /// Dispatch sink that rejects everything with a fixed error
    ///
    /// Attempts are still counted so tests can check that exactly one call
    /// was made and never retried.
    #[derive(Debug, Clone)]
    pub struct FailingDispatch {
        error: DispatchError,
        attempts: Arc<Mutex<usize>>,
    }

    impl FailingDispatch {
        /// Create a sink that always fails with `error`
        #[must_use]
        pub fn new(error: DispatchError) -> Self {
            Self {
                error,
                attempts: Arc::new(Mutex::new(0)),
            }
        }

        /// Number of dispatch attempts seen
        #[must_use]
        pub fn attempts(&self) -> usize {
            self.attempts.lock().map_or(0, |n| *n)
        }
    }

    impl<T: Send + 'static> Dispatch<T> for FailingDispatch {
        fn dispatch(
            &self,
            _value: T,
        ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + '_>> {
            Box::pin(async move {
                if let Ok(mut attempts) = self.attempts.lock() {
                    *attempts += 1;
                }
                Err(self.error.clone())
            })
        }
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use proptest::prelude::*;

    /// Arbitrary single-line input, including empty strings and non-ASCII text
    pub fn typed_text() -> impl Strategy<Value = String> {
        "[^\r\n]{0,40}"
    }

    /// Every value an input field holds while `text` is typed one character
    /// at a time, ending with `text` itself
    ///
    /// Splits on `char` boundaries so multi-byte characters stay whole.
    #[must_use]
    pub fn keystrokes(text: &str) -> Vec<String> {
        text.char_indices()
            .map(|(idx, ch)| text[..idx + ch.len_utf8()].to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::{FailingDispatch, RecordingDispatch};
    use super::properties::keystrokes;
    use todo_form_core::environment::{Dispatch, DispatchError};

    #[tokio::test]
    async fn recording_dispatch_shares_recording_across_clones() {
        let sink: RecordingDispatch<u32> = RecordingDispatch::new();
        let handed_out = sink.clone();

        handed_out.dispatch(1_u32).await.ok();
        handed_out.dispatch(2_u32).await.ok();

        assert_eq!(sink.received(), vec![1, 2]);
        assert_eq!(sink.count(), 2);
    }

    #[tokio::test]
    async fn failing_dispatch_counts_attempts() {
        let sink = FailingDispatch::new(DispatchError::Rejected("full".into()));

        let result = Dispatch::<u32>::dispatch(&sink, 7).await;

        assert_eq!(result, Err(DispatchError::Rejected("full".into())));
        assert_eq!(sink.attempts(), 1);
    }

    #[test]
    fn keystrokes_build_prefixes() {
        assert_eq!(keystrokes("abc"), vec!["a", "ab", "abc"]);
        assert!(keystrokes("").is_empty());
    }

    #[test]
    fn keystrokes_respect_char_boundaries() {
        assert_eq!(keystrokes("né"), vec!["n", "né"]);
    }
}
