//! Integration tests for the todo form
//!
//! Mounts the form on a real Store and drives it the way a host would:
//! keystrokes, submissions, and a sink that is either a recording mock or a
//! host store bound through `bind_add_todo`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use todo_form::{
    DirectDispatch, EnvelopeShape, FormAction, FormConfig, FormError, FormPhase, FormState,
    StoreDispatch, SubmitEvent, SubmitPolicy, TodoAction, TodoForm, TodoFormEnvironment,
    TodoFormReducer, action_log_store, bind_add_todo, render,
};
use todo_form_core::environment::DispatchError;
use todo_form_core::reducer::Reducer;
use todo_form_runtime::StoreError;
use todo_form_testing::mocks::{FailingDispatch, RecordingDispatch};
use todo_form_testing::properties::{keystrokes, typed_text};

// ============================================================================
// Test Fixtures
// ============================================================================

fn mount_recording(config: FormConfig) -> (TodoForm, RecordingDispatch<FormState>) {
    let sink = RecordingDispatch::new();
    let form = TodoForm::mount(config, Arc::new(sink.clone()));
    (form, sink)
}

async fn type_text(form: &TodoForm, text: &str) {
    for value in keystrokes(text) {
        form.on_change_text(value).await.unwrap();
    }
}

// ============================================================================
// Submission scenarios
// ============================================================================

#[tokio::test]
async fn buy_milk_is_submitted_once_and_input_resets() {
    let (form, sink) = mount_recording(FormConfig::default());

    type_text(&form, "buy milk").await;
    assert_eq!(form.view().await.input.value, "buy milk");

    form.on_submit().await.unwrap();

    assert_eq!(sink.received(), vec![FormState::with_text("buy milk")]);
    assert_eq!(form.view().await.input.value, "");
    assert_eq!(form.state().await.phase(), FormPhase::Empty);
}

#[tokio::test]
async fn submit_without_typing_sends_empty_text() {
    let (form, sink) = mount_recording(FormConfig::default());

    form.on_submit().await.unwrap();

    assert_eq!(sink.received(), vec![FormState::new()]);
}

#[tokio::test]
async fn intermediate_keystrokes_produce_no_messages() {
    let (form, sink) = mount_recording(FormConfig::default());

    form.on_change_text("a").await.unwrap();
    form.on_change_text("ab").await.unwrap();
    assert_eq!(sink.count(), 0);

    form.on_submit().await.unwrap();

    assert_eq!(sink.received(), vec![FormState::with_text("ab")]);
}

#[tokio::test]
async fn second_submit_without_retyping_sends_empty_text() {
    let (form, sink) = mount_recording(FormConfig::default());

    type_text(&form, "walk dog").await;
    form.on_submit().await.unwrap();
    form.on_submit().await.unwrap();

    assert_eq!(
        sink.received(),
        vec![FormState::with_text("walk dog"), FormState::new()]
    );
}

#[tokio::test]
async fn retain_policy_keeps_submitted_text() {
    let config = FormConfig::default().with_submit_policy(SubmitPolicy::RetainText);
    let (form, sink) = mount_recording(config);

    type_text(&form, "buy milk").await;
    form.on_submit().await.unwrap();
    form.on_submit().await.unwrap();

    assert_eq!(form.text().await, "buy milk");
    assert_eq!(
        sink.received(),
        vec![FormState::with_text("buy milk"), FormState::with_text("buy milk")]
    );
}

#[tokio::test]
async fn submit_prevents_default_behavior() {
    let (form, _sink) = mount_recording(FormConfig::default());

    let event = form.on_submit().await.unwrap();

    assert!(event.default_prevented());
}

#[tokio::test]
async fn host_raised_event_is_prevented() {
    let (form, sink) = mount_recording(FormConfig::default());
    let event = SubmitEvent::new();

    let mut handle = form.submit(event.clone()).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();

    assert!(event.default_prevented());
    assert_eq!(sink.count(), 1);
}

// ============================================================================
// Sinks
// ============================================================================

#[tokio::test]
async fn connected_binding_delivers_payload_envelope() {
    let host = action_log_store();
    let form = TodoForm::mount(FormConfig::default(), Arc::new(bind_add_todo(&host)));

    type_text(&form, "buy milk").await;
    form.on_submit().await.unwrap();

    let actions = host.state(|s| s.actions.clone()).await;
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0].to_json(EnvelopeShape::Payload).unwrap(),
        json!({"type": "ADD_TODO", "payload": {"text": "buy milk"}})
    );
    assert_eq!(form.text().await, "");
}

#[tokio::test]
async fn direct_dispatch_delivers_todo_envelope() {
    let host = action_log_store();
    let sink = DirectDispatch::new(StoreDispatch::new(&host));
    let config = FormConfig::default()
        .with_submit_policy(SubmitPolicy::RetainText)
        .with_envelope(EnvelopeShape::Todo);
    let form = TodoForm::mount(config.clone(), Arc::new(sink));

    type_text(&form, "call mom").await;
    form.on_submit().await.unwrap();

    let actions = host.state(|s| s.actions.clone()).await;
    assert_eq!(
        actions,
        vec![TodoAction::add_todo(FormState::with_text("call mom"))]
    );
    assert_eq!(
        actions[0].to_json(config.envelope).unwrap(),
        json!({"type": "ADD_TODO", "todo": {"text": "call mom"}})
    );
    assert_eq!(form.text().await, "call mom");
}

#[tokio::test]
async fn sink_failure_reaches_caller_without_restoring_text() {
    let failing = FailingDispatch::new(DispatchError::Rejected("list is full".into()));
    let form = TodoForm::mount(FormConfig::default(), Arc::new(failing.clone()));

    type_text(&form, "buy milk").await;
    let result = form.on_submit().await;

    assert!(
        matches!(
            result,
            Err(FormError::Dispatch(DispatchError::Rejected(ref reason))) if reason == "list is full"
        ),
        "got {result:?}"
    );
    assert_eq!(failing.attempts(), 1);

    let state = form.state().await;
    assert_eq!(state.text, "");
    assert_eq!(
        state.last_error,
        Some(DispatchError::Rejected("list is full".into()))
    );
    assert!(form.view().await.to_string().ends_with("! Dispatch rejected: list is full"));

    form.on_change_text("b").await.unwrap();
    assert!(form.state().await.last_error.is_none());
}

#[tokio::test]
async fn each_failed_submission_is_reported() {
    let failing = FailingDispatch::new(DispatchError::Unavailable("offline".into()));
    let form = TodoForm::mount(FormConfig::default(), Arc::new(failing.clone()));

    assert!(form.on_submit().await.is_err());
    assert!(form.on_submit().await.is_err());
    assert_eq!(failing.attempts(), 2);
}

#[tokio::test]
async fn reject_empty_drops_empty_submission() {
    let (form, sink) = mount_recording(FormConfig::default().with_reject_empty(true));

    let event = form.on_submit().await.unwrap();
    assert!(event.default_prevented());
    assert_eq!(sink.count(), 0);

    type_text(&form, "x").await;
    form.on_submit().await.unwrap();
    assert_eq!(sink.received(), vec![FormState::with_text("x")]);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn unmounted_form_rejects_input() {
    let (form, _sink) = mount_recording(FormConfig::default());
    let handle = form.clone();

    form.unmount().await.unwrap();

    assert!(matches!(
        handle.on_change_text("late").await,
        Err(StoreError::ShutdownInProgress)
    ));
    assert!(matches!(
        handle.on_submit().await,
        Err(FormError::Store(StoreError::ShutdownInProgress))
    ));
}

#[tokio::test]
async fn configured_label_is_rendered() {
    let config = FormConfig {
        label: "new task".to_string(),
        ..FormConfig::default()
    };
    let (form, _sink) = mount_recording(config);

    assert_eq!(form.view().await.to_string(), "new task: [] [Submit]");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn displayed_value_tracks_every_keystroke(text in typed_text()) {
        let env = TodoFormEnvironment::new(
            Arc::new(RecordingDispatch::<FormState>::new()),
            FormConfig::default(),
        );
        let reducer = TodoFormReducer::new();
        let mut state = FormState::new();

        for value in keystrokes(&text) {
            let effects = reducer.reduce(
                &mut state,
                FormAction::ChangeText { value: value.clone() },
                &env,
            );
            prop_assert!(effects.is_empty());
            prop_assert_eq!(render(&state, &env.config).input.value, value);
        }

        prop_assert_eq!(state.text, text);
    }

    #[test]
    fn each_submission_sends_exactly_the_typed_text(text in typed_text()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        let received = runtime.block_on(async {
            let (form, sink) = mount_recording(FormConfig::default());
            type_text(&form, &text).await;
            assert_eq!(sink.count(), 0);
            form.on_submit().await.unwrap();
            sink.received()
        });

        prop_assert_eq!(received, vec![FormState::with_text(text)]);
    }
}
