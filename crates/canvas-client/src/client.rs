//! The HTTP client for the generative backend.

use canvas_core::{CanvasError, Session};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::instruction::{Instruction, InstructionInput};

/// Client over the five backend routes.
///
/// Holds one shared connection pool; cheap to clone. No retries and no
/// local timeout policy; a failed call surfaces as an error and the caller
/// decides whether to resubmit.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct DescribeResponse {
    description: String,
}

/// Error bodies from the backend are JSON with an optional `message`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl CanvasClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a new creative thread from a prompt or a recorded clip.
    pub async fn generate(&self, input: InstructionInput) -> Result<Session, CanvasError> {
        let form = instruction_form(Form::new(), input.resolve()?, "text_prompt")?;
        debug!(base_url = %self.base_url, "dispatching generate-image");
        let response = self
            .http
            .post(self.url("/generate-image"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        read_json(response, "Failed to generate image").await
    }

    /// Free-form description of an image, passed through untouched.
    pub async fn describe(&self, image_url: &str) -> Result<String, CanvasError> {
        if image_url.is_empty() {
            return Err(CanvasError::validation("an image reference is required"));
        }
        let response = self
            .http
            .post(self.url("/describe-image"))
            .json(&serde_json::json!({ "imageUrl": image_url }))
            .send()
            .await
            .map_err(transport)?;
        let body: DescribeResponse = read_json(response, "Failed to describe image").await?;
        Ok(body.description)
    }

    /// Targeted edit of one existing version's image.
    pub async fn refine(
        &self,
        session_id: &str,
        image_url: &str,
        input: InstructionInput,
    ) -> Result<Session, CanvasError> {
        if session_id.is_empty() {
            return Err(CanvasError::validation("a session id is required"));
        }
        if image_url.is_empty() {
            return Err(CanvasError::validation("an image reference is required"));
        }
        let form = Form::new()
            .text("sessionId", session_id.to_string())
            .text("imageUrl", image_url.to_string());
        let form = instruction_form(form, input.resolve()?, "text_instruction")?;
        let response = self
            .http
            .post(self.url("/refine-image"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        read_json(response, "Failed to refine image").await
    }

    /// Broad re-edit of the artwork guided by a fresh instruction.
    pub async fn reimagine(
        &self,
        session_id: &str,
        input: InstructionInput,
    ) -> Result<Session, CanvasError> {
        if session_id.is_empty() {
            return Err(CanvasError::validation("a session id is required"));
        }
        let form = Form::new().text("sessionId", session_id.to_string());
        let form = instruction_form(form, input.resolve()?, "text_instruction")?;
        let response = self
            .http
            .post(self.url("/update-image"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        read_json(response, "Failed to reimagine image").await
    }

    pub async fn fetch_session(&self, id: &str) -> Result<Session, CanvasError> {
        if id.is_empty() {
            return Err(CanvasError::validation("a session id is required"));
        }
        let response = self
            .http
            .get(self.url(&format!("/sessions/{id}")))
            .send()
            .await
            .map_err(transport)?;
        read_json(response, "Failed to fetch session data").await
    }
}

/// Attach the resolved instruction to a multipart form.
///
/// Generation names its text field `text_prompt`; the edit routes use
/// `text_instruction`. Audio always travels as `audio_file`.
fn instruction_form(
    form: Form,
    instruction: Instruction,
    text_field: &'static str,
) -> Result<Form, CanvasError> {
    match instruction {
        Instruction::Text(text) => Ok(form.text(text_field, text)),
        Instruction::Audio(clip) => {
            let file_name = clip.file_name();
            let mime = clip.mime_type().to_string();
            let part = Part::bytes(clip.into_bytes())
                .file_name(file_name)
                .mime_str(&mime)
                .map_err(|e| CanvasError::transport(format!("failed to build multipart: {e}")))?;
            Ok(form.part("audio_file", part))
        }
    }
}

fn transport(error: reqwest::Error) -> CanvasError {
    CanvasError::transport(error.to_string())
}

/// Decode a success body, or surface the backend's rejection.
///
/// Non-success responses carry the backend's `message` through when it is
/// present; otherwise the per-operation fallback stands in.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, CanvasError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());
        return Err(CanvasError::rejected(status.as_u16(), message));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| CanvasError::transport(format!("failed to decode response: {e}")))
}
