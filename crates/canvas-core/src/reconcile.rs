//! Reconciliation: derive the display order and current selection from a
//! raw session payload.

use crate::error::CanvasError;
use crate::model::{Session, Version};

/// Display-ready view of a session's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// All versions, most recent first
    pub versions: Vec<Version>,
    /// The entry matching the session's version pointer
    pub selected: Version,
}

/// Turn a raw [`Session`] into its display shape.
///
/// Each record gets a synthesized `"v" + version_number` id, the list is
/// sorted by descending version number (the backend's order is not the
/// display order), and the session's pointer picks the selection. The sort
/// is stable, so equal version numbers keep their received order.
///
/// A pointer with no matching version is a contract violation by the
/// backend and fails hard; rendering a silently wrong version is worse
/// than no render.
pub fn reconcile(session: &Session) -> Result<Reconciled, CanvasError> {
    let mut versions: Vec<Version> = session
        .versions
        .iter()
        .cloned()
        .map(Version::from)
        .collect();
    versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));

    let selected = versions
        .iter()
        .find(|v| v.version_number == session.version_number)
        .cloned()
        .ok_or_else(|| {
            CanvasError::Reconciliation("initial selected version not found".to_string())
        })?;

    Ok(Reconciled { versions, selected })
}
