//! Narration: spoken playback of artwork descriptions.
//!
//! The description text itself comes from the backend untouched; this module
//! only sequences play/pause/resume/stop over a synthesis backend.

/// Low-level speech synthesis surface.
pub trait Speaker {
    fn speak(&mut self, text: &str);
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    Idle,
    Playing,
    Paused,
}

/// Playback controller over a [`Speaker`].
///
/// One utterance at a time: starting a new `play` cancels whatever is
/// in flight before speaking again.
pub struct Narrator<S: Speaker> {
    speaker: S,
    state: NarrationState,
}

impl<S: Speaker> Narrator<S> {
    pub fn new(speaker: S) -> Self {
        Self {
            speaker,
            state: NarrationState::Idle,
        }
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn play(&mut self, text: &str) {
        self.speaker.cancel();
        self.speaker.speak(text);
        self.state = NarrationState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == NarrationState::Playing {
            self.speaker.pause();
            self.state = NarrationState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == NarrationState::Paused {
            self.speaker.resume();
            self.state = NarrationState::Playing;
        }
    }

    pub fn stop(&mut self) {
        self.speaker.cancel();
        self.state = NarrationState::Idle;
    }

    /// The single play/pause control: idle plays the text, playing pauses,
    /// paused resumes.
    pub fn toggle(&mut self, text: &str) {
        match self.state {
            NarrationState::Idle => self.play(text),
            NarrationState::Playing => self.pause(),
            NarrationState::Paused => self.resume(),
        }
    }

    /// The synthesis backend reports the utterance ran to its end.
    pub fn finished(&mut self) {
        self.state = NarrationState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSpeaker {
        commands: Vec<String>,
    }

    impl Speaker for RecordingSpeaker {
        fn speak(&mut self, text: &str) {
            self.commands.push(format!("speak:{text}"));
        }

        fn pause(&mut self) {
            self.commands.push("pause".into());
        }

        fn resume(&mut self) {
            self.commands.push("resume".into());
        }

        fn cancel(&mut self) {
            self.commands.push("cancel".into());
        }
    }

    fn narrator() -> Narrator<RecordingSpeaker> {
        Narrator::new(RecordingSpeaker::default())
    }

    #[test]
    fn toggle_walks_idle_playing_paused() {
        let mut n = narrator();
        assert_eq!(n.state(), NarrationState::Idle);

        n.toggle("a quiet shoreline");
        assert_eq!(n.state(), NarrationState::Playing);

        n.toggle("a quiet shoreline");
        assert_eq!(n.state(), NarrationState::Paused);

        n.toggle("a quiet shoreline");
        assert_eq!(n.state(), NarrationState::Playing);
    }

    #[test]
    fn play_cancels_before_speaking() {
        let mut n = narrator();
        n.play("first");
        n.play("second");
        assert_eq!(
            n.speaker().commands,
            vec!["cancel", "speak:first", "cancel", "speak:second"]
        );
    }

    #[test]
    fn stop_returns_to_idle_from_any_state() {
        let mut n = narrator();
        n.play("text");
        n.stop();
        assert_eq!(n.state(), NarrationState::Idle);

        n.play("text");
        n.pause();
        n.stop();
        assert_eq!(n.state(), NarrationState::Idle);
        assert_eq!(n.speaker().commands.last().unwrap(), "cancel");
    }

    #[test]
    fn pause_and_resume_only_apply_in_their_states() {
        let mut n = narrator();
        n.pause();
        n.resume();
        assert_eq!(n.state(), NarrationState::Idle);
        assert!(n.speaker().commands.is_empty());
    }

    #[test]
    fn finished_utterance_resets_to_idle() {
        let mut n = narrator();
        n.play("text");
        n.finished();
        assert_eq!(n.state(), NarrationState::Idle);
    }
}
