//! Transient audio handoff across the navigation boundary.

use canvas_capture::AudioClip;

/// One-slot holder for a clip recorded on the creation view and consumed
/// by the studio view.
///
/// `take` transfers ownership and clears the slot, so a stale clip cannot
/// be replayed on a later visit.
#[derive(Debug, Default)]
pub struct AudioHandoff {
    pending: Option<AudioClip>,
}

impl AudioHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash a freshly recorded clip, replacing any unconsumed one.
    pub fn set(&mut self, clip: AudioClip) {
        self.pending = Some(clip);
    }

    /// Consume the pending clip, leaving the slot empty.
    pub fn take(&mut self) -> Option<AudioClip> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
