//! Speech capture capability.
//!
//! The creation view holds a capture open while the user speaks, receives
//! interim transcripts, and collects one finished clip on release. Real
//! implementations wrap the platform recorder and recognizer; tests drive
//! the same surface through [`ScriptedCapture`].

use thiserror::Error;

use crate::clip::AudioClip;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("capture is already running")]
    AlreadyRunning,

    #[error("capture is not running")]
    NotRunning,

    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Sink for events emitted while a capture is open.
pub trait CaptureEvents {
    /// Full transcript so far; called again on every recognition update.
    fn on_transcript(&mut self, transcript: &str);

    fn on_error(&mut self, error: &CaptureError);
}

/// One press-and-hold recording surface.
pub trait SpeechCapture {
    fn start_capture(&mut self, events: &mut dyn CaptureEvents) -> Result<(), CaptureError>;

    /// Stop and hand back the finished clip, when the recorder produced one.
    fn stop_capture(&mut self) -> Result<Option<AudioClip>, CaptureError>;
}

/// Deterministic capture for tests: replays scripted transcripts on start
/// and yields its clip exactly once on stop.
#[derive(Debug, Default)]
pub struct ScriptedCapture {
    transcripts: Vec<String>,
    clip: Option<AudioClip>,
    recording: bool,
}

impl ScriptedCapture {
    pub fn new(transcripts: Vec<String>, clip: Option<AudioClip>) -> Self {
        Self {
            transcripts,
            clip,
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }
}

impl SpeechCapture for ScriptedCapture {
    fn start_capture(&mut self, events: &mut dyn CaptureEvents) -> Result<(), CaptureError> {
        if self.recording {
            return Err(CaptureError::AlreadyRunning);
        }
        self.recording = true;
        for transcript in &self.transcripts {
            events.on_transcript(transcript);
        }
        Ok(())
    }

    fn stop_capture(&mut self) -> Result<Option<AudioClip>, CaptureError> {
        if !self.recording {
            return Err(CaptureError::NotRunning);
        }
        self.recording = false;
        Ok(self.clip.take())
    }
}
