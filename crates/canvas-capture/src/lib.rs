//! Canvas Capture: audio clips, the speech-capture capability, and spoken
//! narration of descriptions.
//!
//! Microphone access, speech recognition, and speech synthesis are platform
//! services. This crate keeps them behind small traits so the dispatch and
//! studio layers stay testable without a device: a [`SpeechCapture`] produces
//! one opaque [`AudioClip`] per recording plus streamed transcripts, and a
//! [`Narrator`] drives playback of descriptive text over a [`Speaker`].

pub mod capture;
pub mod clip;
pub mod narration;

pub use capture::{CaptureError, CaptureEvents, ScriptedCapture, SpeechCapture};
pub use clip::{AudioClip, DEFAULT_CLIP_MIME};
pub use narration::{Narrator, NarrationState, Speaker};
