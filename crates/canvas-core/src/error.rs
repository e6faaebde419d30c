//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    /// A required input is missing; the request was never dispatched.
    #[error("VALIDATION/{0}")]
    Validation(String),

    /// The upstream service answered with a non-success status.
    #[error("UPSTREAM/{status}: {message}")]
    Rejected { status: u16, message: String },

    /// Network or decode failure before a usable response existed.
    #[error("TRANSPORT/{0}")]
    Transport(String),

    /// A session pointed at a version that is not in its own history.
    #[error("RECONCILE/{0}")]
    Reconciliation(String),
}

impl CanvasError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// HTTP status a relay would answer with for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Rejected { status, .. } => *status,
            Self::Transport(_) | Self::Reconciliation(_) => 500,
        }
    }

    /// True when the upstream itself refused the request, as opposed to a
    /// failure detected locally.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_codes_are_prefixed() {
        assert_eq!(
            CanvasError::validation("text_prompt is required").to_string(),
            "VALIDATION/text_prompt is required"
        );
        assert_eq!(
            CanvasError::rejected(422, "bad prompt").to_string(),
            "UPSTREAM/422: bad prompt"
        );
        assert_eq!(
            CanvasError::transport("connection refused").to_string(),
            "TRANSPORT/connection refused"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(CanvasError::validation("x").status(), 400);
        assert_eq!(CanvasError::rejected(502, "x").status(), 502);
        assert_eq!(CanvasError::transport("x").status(), 500);
        assert_eq!(
            CanvasError::Reconciliation("not found".into()).status(),
            500
        );
    }

    #[test]
    fn rejection_is_distinct_from_transport() {
        assert!(CanvasError::rejected(500, "x").is_rejection());
        assert!(!CanvasError::transport("x").is_rejection());
    }
}
