//! Integration tests for alert auto-hide through the runtime
//!
//! Uses paused tokio time so timer deadlines are exact.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::common::fixtures::{question_dropped, sample_survey};
use survey_editor::{
    AlertLevel, BlockId, Config, EditorRuntime, Intent, MemoryStore, SurveyStore,
};

fn store_with_timeout(timeout: Duration) -> SurveyStore {
    SurveyStore::with_initial_survey(
        Config::default().with_alert_timeout(timeout),
        Box::new(MemoryStore::new()),
        sample_survey(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_alert_is_hidden() {
    let (mut runtime, handle) = EditorRuntime::new(store_with_timeout(Duration::from_secs(5)));
    let hides = Arc::new(Mutex::new(Vec::new()));
    let sink = hides.clone();
    let last_visible = Arc::new(Mutex::new(false));
    runtime.store_mut().subscribe(move |state| {
        let mut was_visible = last_visible.lock().unwrap();
        if *was_visible && !state.alert.visible {
            sink.lock().unwrap().push(state.alert.message.clone());
        }
        *was_visible = state.alert.visible;
    });
    let task = tokio::spawn(runtime.run());

    handle.dispatch(Intent::ShowAlert {
        message: "X".to_string(),
        level: AlertLevel::Success,
    });
    handle.dispatch(Intent::ShowAlert {
        message: "Y".to_string(),
        level: AlertLevel::Info,
    });
    tokio::time::sleep(Duration::from_secs(12)).await;
    handle.shutdown();

    let store = task.await.unwrap();
    assert_eq!(*hides.lock().unwrap(), vec!["Y".to_string()]);
    assert!(!store.state().alert.visible);
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout_is_used() {
    let (runtime, handle) = EditorRuntime::new(store_with_timeout(Duration::from_millis(500)));
    let task = tokio::spawn(runtime.run());

    handle.dispatch(Intent::Load);
    handle.dispatch(Intent::BlockDropped { target_id: None });
    tokio::time::sleep(Duration::from_millis(400)).await;
    handle.shutdown();
    let store = task.await.unwrap();
    assert!(store.state().alert.visible);

    let (runtime, handle) = EditorRuntime::new(store);
    let task = tokio::spawn(runtime.run());
    handle.dispatch(question_dropped(&BlockId::from("b_7"), "Anything else?"));
    tokio::time::sleep(Duration::from_millis(600)).await;
    handle.shutdown();
    let store = task.await.unwrap();
    assert!(!store.state().alert.visible);
    assert_eq!(store.state().alert.message, "New Question added.");
}

#[tokio::test(start_paused = true)]
async fn test_rejected_intent_alert_also_expires() {
    let (runtime, handle) = EditorRuntime::new(store_with_timeout(Duration::from_secs(5)));
    let task = tokio::spawn(runtime.run());

    handle.dispatch(Intent::UndoSurvey);
    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.dispatch(Intent::ScrollToItem {
        id: "b_1".to_string(),
    });
    tokio::time::sleep(Duration::from_secs(5)).await;
    handle.shutdown();

    let store = task.await.unwrap();
    assert_eq!(store.state().alert.level, AlertLevel::Warning);
    assert!(!store.state().alert.visible);
    assert_eq!(store.state().focused_item.as_deref(), Some("b_1"));
}
