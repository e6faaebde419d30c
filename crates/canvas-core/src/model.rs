//! Data Model: Session, VersionRecord, Version
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Free-form classification labels attached to an artifact by the backend.
///
/// The label set is open-ended and ordered the way the backend emitted it.
pub type IntentData = IndexMap<String, String>;

/// Labeled prompt facets the backend composed into the rendering prompt.
pub type PromptComponents = IndexMap<String, String>;

/// One artifact as it arrives inside `Session::versions`.
///
/// Records on the wire carry no stable id of their own; reconciliation
/// synthesizes one from the version number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Public URL of the rendered image
    pub image_url: String,
    /// Backend storage reference, the target for refinement edits
    #[serde(rename = "gcs_uri")]
    pub storage_uri: String,
    pub intent_data: IntentData,
    pub prompt_components: PromptComponents,
    /// Monotonically assigned by the backend; unique within a session
    pub version_number: i64,
    /// Full prompt that produced this artifact
    pub prompt: String,
}

/// A creative thread rooted in one base prompt.
///
/// Created by the backend on the first generation request and mutated by it
/// on every reimagine/refine; the client never edits a session locally, it
/// replaces its copy wholesale with the latest returned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Base artwork fields, mirrored from the first version
    pub image_url: String,
    #[serde(rename = "gcs_uri")]
    pub storage_uri: String,
    pub intent_data: IntentData,
    pub prompt_components: PromptComponents,
    /// Pointer at the currently active entry in `versions`
    pub version_number: i64,
    pub base_prompt: String,
    pub versions: Vec<VersionRecord>,
}

/// A display-ready artifact with its synthesized id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// `"v" + version_number`; unique within a session
    pub id: String,
    pub image_url: String,
    #[serde(rename = "gcs_uri")]
    pub storage_uri: String,
    pub intent_data: IntentData,
    pub prompt_components: PromptComponents,
    pub version_number: i64,
    pub prompt: String,
}

impl From<VersionRecord> for Version {
    fn from(record: VersionRecord) -> Self {
        Self {
            id: format!("v{}", record.version_number),
            image_url: record.image_url,
            storage_uri: record.storage_uri,
            intent_data: record.intent_data,
            prompt_components: record.prompt_components,
            version_number: record.version_number,
            prompt: record.prompt,
        }
    }
}
