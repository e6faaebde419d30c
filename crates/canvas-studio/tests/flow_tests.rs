//! Studio flow tests against a stub backend: one network round trip per
//! user action, wholesale session replacement, and the initial-fetch guard.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use canvas_client::{CanvasClient, InstructionInput};
use canvas_core::CanvasError;
use canvas_studio::StudioFlow;

#[derive(Clone, Default)]
struct Backend {
    generate_calls: Arc<AtomicUsize>,
    refine_fields: Arc<Mutex<Vec<String>>>,
    /// Next session returned by the mutation routes.
    next: Arc<Mutex<Value>>,
}

fn session_json(current: i64, numbers: &[i64]) -> Value {
    let versions: Vec<Value> = numbers
        .iter()
        .map(|n| {
            json!({
                "image_url": format!("https://img.example/{n}.png"),
                "gcs_uri": format!("gs://canvas/{n}"),
                "intent_data": {},
                "prompt_components": {},
                "version_number": n,
                "prompt": format!("prompt {n}")
            })
        })
        .collect();
    json!({
        "id": "sess-1",
        "image_url": "https://img.example/base.png",
        "gcs_uri": "gs://canvas/base",
        "intent_data": {},
        "prompt_components": {},
        "version_number": current,
        "base_prompt": "a quiet shoreline",
        "versions": versions
    })
}

async fn drain(mut multipart: Multipart) -> Vec<String> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        fields.push(format!("{name}={}", String::from_utf8_lossy(&bytes)));
    }
    fields
}

async fn stub_generate(State(backend): State<Backend>, multipart: Multipart) -> Json<Value> {
    drain(multipart).await;
    backend.generate_calls.fetch_add(1, Ordering::SeqCst);
    Json(backend.next.lock().unwrap().clone())
}

async fn stub_update(State(backend): State<Backend>, multipart: Multipart) -> Json<Value> {
    drain(multipart).await;
    Json(backend.next.lock().unwrap().clone())
}

async fn stub_refine(State(backend): State<Backend>, multipart: Multipart) -> Json<Value> {
    let fields = drain(multipart).await;
    backend.refine_fields.lock().unwrap().extend(fields);
    Json(backend.next.lock().unwrap().clone())
}

async fn spawn(backend: Backend) -> String {
    let router = Router::new()
        .route("/generate-image", post(stub_generate))
        .route("/update-image", post(stub_update))
        .route("/refine-image", post(stub_refine))
        .with_state(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn initial_generation_runs_once() {
    let backend = Backend::default();
    *backend.next.lock().unwrap() = session_json(1, &[1]);
    let client = CanvasClient::new(spawn(backend.clone()).await);
    let mut flow = StudioFlow::new();

    let first = flow
        .generate_initial(&client, InstructionInput::text("a quiet shoreline"))
        .await
        .unwrap();
    assert!(first);
    assert_eq!(flow.selected().unwrap().id, "v1");

    // A re-render resubmits; the guard swallows it without a round trip.
    let second = flow
        .generate_initial(&client, InstructionInput::text("a quiet shoreline"))
        .await
        .unwrap();
    assert!(!second);
    assert_eq!(backend.generate_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reimagine_replaces_the_session_wholesale() {
    let backend = Backend::default();
    *backend.next.lock().unwrap() = session_json(1, &[1]);
    let client = CanvasClient::new(spawn(backend.clone()).await);
    let mut flow = StudioFlow::new();

    flow.generate_initial(&client, InstructionInput::text("p"))
        .await
        .unwrap();

    *backend.next.lock().unwrap() = session_json(2, &[1, 2]);
    flow.reimagine(&client, InstructionInput::text("bolder colors"))
        .await
        .unwrap();

    assert_eq!(flow.versions().len(), 2);
    assert_eq!(flow.selected().unwrap().id, "v2");
    assert_eq!(flow.session().unwrap().version_number, 2);
}

#[tokio::test]
async fn refine_targets_the_selected_versions_image() {
    let backend = Backend::default();
    *backend.next.lock().unwrap() = session_json(2, &[1, 2]);
    let client = CanvasClient::new(spawn(backend.clone()).await);
    let mut flow = StudioFlow::new();

    flow.generate_initial(&client, InstructionInput::text("p"))
        .await
        .unwrap();
    // The user flips back to the older version before refining.
    flow.select("v1").unwrap();

    *backend.next.lock().unwrap() = session_json(3, &[1, 2, 3]);
    flow.refine(&client, InstructionInput::text("soften the horizon"))
        .await
        .unwrap();

    let fields = backend.refine_fields.lock().unwrap().clone();
    assert!(fields.contains(&"imageUrl=gs://canvas/1".to_string()));
    assert!(fields.contains(&"sessionId=sess-1".to_string()));
    assert_eq!(flow.selected().unwrap().id, "v3");
}

#[tokio::test]
async fn refine_without_a_session_is_rejected_locally() {
    let client = CanvasClient::new("http://127.0.0.1:1");
    let mut flow = StudioFlow::new();
    let err = flow
        .refine(&client, InstructionInput::text("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, CanvasError::Validation(_)));
}

#[tokio::test]
async fn a_contract_violating_reply_keeps_the_old_state() {
    let backend = Backend::default();
    *backend.next.lock().unwrap() = session_json(1, &[1]);
    let client = CanvasClient::new(spawn(backend.clone()).await);
    let mut flow = StudioFlow::new();

    flow.generate_initial(&client, InstructionInput::text("p"))
        .await
        .unwrap();

    // Pointer outside the returned history: reconciliation must fail and
    // the studio must keep rendering the last good version.
    *backend.next.lock().unwrap() = session_json(9, &[1, 2]);
    let err = flow
        .reimagine(&client, InstructionInput::text("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, CanvasError::Reconciliation(_)));
    assert_eq!(flow.selected().unwrap().id, "v1");
    assert_eq!(flow.versions().len(), 1);
}
