//! Instruction inputs for the generation and edit operations.

use canvas_capture::AudioClip;
use canvas_core::CanvasError;

/// Raw user input as the views hand it over: typed text, a recorded clip,
/// or (transiently) both.
#[derive(Debug, Clone, Default)]
pub struct InstructionInput {
    pub text: Option<String>,
    pub audio: Option<AudioClip>,
}

impl InstructionInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            audio: None,
        }
    }

    pub fn audio(clip: AudioClip) -> Self {
        Self {
            text: None,
            audio: Some(clip),
        }
    }

    /// Collapse to the single instruction that gets dispatched.
    ///
    /// Audio wins when both are present. Neither present is a hard
    /// validation error; the request is never sent.
    pub fn resolve(self) -> Result<Instruction, CanvasError> {
        if let Some(clip) = self.audio {
            return Ok(Instruction::Audio(clip));
        }
        match self.text {
            Some(text) if !text.is_empty() => Ok(Instruction::Text(text)),
            _ => Err(CanvasError::validation(
                "either a text instruction or an audio clip must be provided",
            )),
        }
    }
}

/// Exactly one dispatched instruction.
#[derive(Debug, Clone)]
pub enum Instruction {
    Text(String),
    Audio(AudioClip),
}
