//! Captured audio payloads.

/// MIME type recorders produce when nothing more specific is known.
pub const DEFAULT_CLIP_MIME: &str = "audio/webm";

/// One recorded utterance, opaque to everything but the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    mime_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Clip in the default recording container.
    pub fn webm(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DEFAULT_CLIP_MIME)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Upload filename for this clip.
    ///
    /// Audio backends lean on the extension to pick the container format, so
    /// it has to agree with the MIME type rather than default to one name.
    pub fn file_name(&self) -> String {
        format!("audio.{}", extension_for_mime(&self.mime_type))
    }
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "audio/aac" => "m4a",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" | "audio/vorbis" => "ogg",
        "audio/webm" => "webm",
        "audio/flac" | "audio/x-flac" => "flac",
        _ => "wav",
    }
}
