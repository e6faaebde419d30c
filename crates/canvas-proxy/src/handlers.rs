//! Relay handlers for the five backend routes.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use canvas_core::CANVAS_VERSION;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::ProxyState;

/// Multipart fields accepted on the mutation routes. Unknown fields are
/// ignored, matching the upstream contract.
#[derive(Default)]
struct InstructionForm {
    session_id: Option<String>,
    image_url: Option<String>,
    text: Option<String>,
    audio: Option<AudioField>,
}

struct AudioField {
    bytes: Vec<u8>,
    file_name: String,
    mime: String,
}

pub async fn generate_image(State(state): State<ProxyState>, multipart: Multipart) -> Response {
    const ROUTE: &str = "generate-image";
    let form = match read_form(multipart, "text_prompt").await {
        Ok(form) => form,
        Err(message) => return reject(&state, ROUTE, &message),
    };
    if form.text.is_none() && form.audio.is_none() {
        return reject(&state, ROUTE, "text_prompt or audio_file is required");
    }
    let upstream_form = match build_upstream_form(form, "text_prompt") {
        Ok(upstream_form) => upstream_form,
        Err(response) => return response,
    };
    relay_multipart(
        &state,
        ROUTE,
        "/generate-image",
        upstream_form,
        "Failed to generate image",
    )
    .await
}

pub async fn refine_image(State(state): State<ProxyState>, multipart: Multipart) -> Response {
    const ROUTE: &str = "refine-image";
    let form = match read_form(multipart, "text_instruction").await {
        Ok(form) => form,
        Err(message) => return reject(&state, ROUTE, &message),
    };
    if form.session_id.is_none() {
        return reject(&state, ROUTE, "sessionId is required");
    }
    if form.image_url.is_none() {
        return reject(&state, ROUTE, "imageUrl is required");
    }
    if form.text.is_none() && form.audio.is_none() {
        return reject(&state, ROUTE, "text_instruction or audio_file is required");
    }
    let upstream_form = match build_upstream_form(form, "text_instruction") {
        Ok(upstream_form) => upstream_form,
        Err(response) => return response,
    };
    relay_multipart(
        &state,
        ROUTE,
        "/refine-image",
        upstream_form,
        "Failed to refine image",
    )
    .await
}

pub async fn update_image(State(state): State<ProxyState>, multipart: Multipart) -> Response {
    const ROUTE: &str = "update-image";
    let form = match read_form(multipart, "text_instruction").await {
        Ok(form) => form,
        Err(message) => return reject(&state, ROUTE, &message),
    };
    if form.session_id.is_none() {
        return reject(&state, ROUTE, "sessionId is required");
    }
    if form.text.is_none() && form.audio.is_none() {
        return reject(&state, ROUTE, "text_instruction or audio_file is required");
    }
    let upstream_form = match build_upstream_form(form, "text_instruction") {
        Ok(upstream_form) => upstream_form,
        Err(response) => return response,
    };
    relay_multipart(
        &state,
        ROUTE,
        "/update-image",
        upstream_form,
        "Failed to update image",
    )
    .await
}

/// Describe wraps upstream failures as `{ "message": … }` instead of
/// relaying the raw body, keeping its callers on one error shape.
pub async fn describe_image(State(state): State<ProxyState>, Json(body): Json<Value>) -> Response {
    const ROUTE: &str = "describe-image";
    let Some(image_url) = body.get("imageUrl").and_then(Value::as_str) else {
        return reject(&state, ROUTE, "Image URL is required");
    };

    let request_id = Uuid::new_v4();
    let result = state
        .http
        .post(format!("{}/describe-image", state.upstream))
        .json(&json!({ "imageUrl": image_url }))
        .send()
        .await;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            error!(%request_id, route = ROUTE, error = %e, "upstream request failed");
            state.metrics.observe(ROUTE, "transport_error");
            return status_response(500, json!({ "message": "Internal server error" }));
        }
    };

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|b| b.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| "Failed to describe image from external API".to_string());
        info!(%request_id, route = ROUTE, status, "upstream rejected describe");
        state.metrics.observe(ROUTE, "upstream_error");
        return status_response(status, json!({ "message": message }));
    }

    match response.json::<Value>().await {
        Ok(body) => {
            info!(%request_id, route = ROUTE, status, "relayed upstream response");
            state.metrics.observe(ROUTE, "ok");
            status_response(status, body)
        }
        Err(e) => {
            error!(%request_id, route = ROUTE, error = %e, "unreadable upstream body");
            state.metrics.observe(ROUTE, "transport_error");
            status_response(500, json!({ "message": "Internal server error" }))
        }
    }
}

pub async fn get_session(State(state): State<ProxyState>, Path(id): Path<String>) -> Response {
    const ROUTE: &str = "sessions";
    let request_id = Uuid::new_v4();
    let result = state
        .http
        .get(format!("{}/sessions/{id}", state.upstream))
        .send()
        .await;
    finish_relay(
        &state,
        ROUTE,
        request_id,
        result,
        "Failed to fetch session data",
    )
    .await
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": CANVAS_VERSION }))
}

pub async fn metrics(State(state): State<ProxyState>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Drain the inbound multipart body into the known fields.
async fn read_form(mut multipart: Multipart, text_field: &str) -> Result<InstructionForm, String> {
    let mut form = InstructionForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("malformed multipart body: {e}"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "audio_file" {
            let file_name = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "audio.webm".to_string());
            let mime = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| "audio/webm".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("malformed multipart body: {e}"))?
                .to_vec();
            form.audio = Some(AudioField {
                bytes,
                file_name,
                mime,
            });
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| format!("malformed multipart body: {e}"))?;
        match name.as_str() {
            "sessionId" => form.session_id = Some(value),
            "imageUrl" => form.image_url = Some(value),
            name if name == text_field => form.text = Some(value),
            _ => {}
        }
    }
    Ok(form)
}

/// Repackage the accepted fields for the upstream. Audio wins over text
/// when both arrived.
fn build_upstream_form(
    form: InstructionForm,
    text_field: &'static str,
) -> Result<reqwest::multipart::Form, Response> {
    let mut upstream = reqwest::multipart::Form::new();
    if let Some(session_id) = form.session_id {
        upstream = upstream.text("sessionId", session_id);
    }
    if let Some(image_url) = form.image_url {
        upstream = upstream.text("imageUrl", image_url);
    }
    if let Some(audio) = form.audio {
        let part = reqwest::multipart::Part::bytes(audio.bytes)
            .file_name(audio.file_name)
            .mime_str(&audio.mime)
            .map_err(|e| {
                status_response(500, json!({ "message": format!("Failed to forward audio: {e}") }))
            })?;
        upstream = upstream.part("audio_file", part);
    } else if let Some(text) = form.text {
        upstream = upstream.text(text_field, text);
    }
    Ok(upstream)
}

async fn relay_multipart(
    state: &ProxyState,
    route: &'static str,
    path: &str,
    form: reqwest::multipart::Form,
    fallback: &str,
) -> Response {
    let request_id = Uuid::new_v4();
    let result = state
        .http
        .post(format!("{}{path}", state.upstream))
        .multipart(form)
        .send()
        .await;
    finish_relay(state, route, request_id, result, fallback).await
}

/// Pass the upstream status and JSON body straight back; a transport or
/// decode failure becomes the generic per-operation 500.
async fn finish_relay(
    state: &ProxyState,
    route: &'static str,
    request_id: Uuid,
    result: Result<reqwest::Response, reqwest::Error>,
    fallback: &str,
) -> Response {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            error!(%request_id, route, error = %e, "upstream request failed");
            state.metrics.observe(route, "transport_error");
            return status_response(500, json!({ "message": fallback }));
        }
    };

    let status = response.status().as_u16();
    match response.json::<Value>().await {
        Ok(body) => {
            info!(%request_id, route, status, "relayed upstream response");
            let outcome = if (200..300).contains(&status) {
                "ok"
            } else {
                "upstream_error"
            };
            state.metrics.observe(route, outcome);
            status_response(status, body)
        }
        Err(e) => {
            error!(%request_id, route, error = %e, "unreadable upstream body");
            state.metrics.observe(route, "transport_error");
            status_response(500, json!({ "message": fallback }))
        }
    }
}

fn reject(state: &ProxyState, route: &str, message: &str) -> Response {
    state.metrics.observe(route, "validation_error");
    status_response(400, json!({ "message": message }))
}

fn status_response(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}
