//! Studio flow: session state and the operations that advance it.

use canvas_client::{CanvasClient, InstructionInput};
use canvas_core::{reconcile, CanvasError, Session, Version};
use tracing::debug;

/// State behind the studio view for a single page visit.
///
/// Holds the latest backend session plus its reconciled display shape.
/// Every mutation round trip ends in [`StudioFlow::apply_session`], which
/// replaces the whole trio atomically; nothing is ever patched in place.
#[derive(Debug, Default)]
pub struct StudioFlow {
    session: Option<Session>,
    versions: Vec<Version>,
    selected: Option<Version>,
    has_fetched: bool,
}

impl StudioFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Display order: most recent version first.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn selected(&self) -> Option<&Version> {
        self.selected.as_ref()
    }

    /// Claim the one-shot right to run the initial generation.
    ///
    /// Re-renders of the view can call into the flow more than once before
    /// the first response lands; only the first caller gets `true`.
    pub fn try_begin_initial(&mut self) -> bool {
        if self.has_fetched {
            return false;
        }
        self.has_fetched = true;
        true
    }

    /// Replace the current state with a freshly returned session.
    ///
    /// Reconciliation runs first; when it fails the previous state stays
    /// untouched and the error is fatal to the render.
    pub fn apply_session(&mut self, session: Session) -> Result<(), CanvasError> {
        let reconciled = reconcile(&session)?;
        debug!(
            session_id = %session.id,
            versions = reconciled.versions.len(),
            selected = %reconciled.selected.id,
            "applying session"
        );
        self.versions = reconciled.versions;
        self.selected = Some(reconciled.selected);
        self.session = Some(session);
        Ok(())
    }

    /// Switch the displayed version.
    pub fn select(&mut self, version_id: &str) -> Result<(), CanvasError> {
        let found = self
            .versions
            .iter()
            .find(|v| v.id == version_id)
            .cloned()
            .ok_or_else(|| CanvasError::validation(format!("unknown version id: {version_id}")))?;
        self.selected = Some(found);
        Ok(())
    }

    /// Run the initial generation, at most once per visit.
    ///
    /// Returns `false` when the guard had already been claimed and nothing
    /// was dispatched.
    pub async fn generate_initial(
        &mut self,
        client: &CanvasClient,
        input: InstructionInput,
    ) -> Result<bool, CanvasError> {
        if !self.try_begin_initial() {
            return Ok(false);
        }
        let session = client.generate(input).await?;
        self.apply_session(session)?;
        Ok(true)
    }

    /// Broad re-edit of the whole artwork.
    pub async fn reimagine(
        &mut self,
        client: &CanvasClient,
        input: InstructionInput,
    ) -> Result<(), CanvasError> {
        let session_id = self.require_session_id()?;
        let session = client.reimagine(&session_id, input).await?;
        self.apply_session(session)
    }

    /// Targeted edit of the currently selected version's image.
    pub async fn refine(
        &mut self,
        client: &CanvasClient,
        input: InstructionInput,
    ) -> Result<(), CanvasError> {
        let session_id = self.require_session_id()?;
        let target = self
            .selected
            .as_ref()
            .map(|v| v.storage_uri.clone())
            .ok_or_else(|| CanvasError::validation("no version selected for refinement"))?;
        let session = client.refine(&session_id, &target, input).await?;
        self.apply_session(session)
    }

    /// Describe the currently selected version's image.
    pub async fn describe_selected(&self, client: &CanvasClient) -> Result<String, CanvasError> {
        let target = self
            .selected
            .as_ref()
            .map(|v| v.storage_uri.clone())
            .ok_or_else(|| CanvasError::validation("no image available to describe"))?;
        client.describe(&target).await
    }

    /// Load an existing session by id, replacing the current state.
    pub async fn load_session(
        &mut self,
        client: &CanvasClient,
        id: &str,
    ) -> Result<(), CanvasError> {
        let session = client.fetch_session(id).await?;
        self.apply_session(session)
    }

    fn require_session_id(&self) -> Result<String, CanvasError> {
        self.session
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or_else(|| CanvasError::validation("no active session"))
    }
}
