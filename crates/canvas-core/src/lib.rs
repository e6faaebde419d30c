//! Canvas Core: session model, reconciliation, and the unified error model.
//!
//! A creative thread lives upstream as a [`Session`]: one base prompt plus an
//! ordered history of artwork versions. This crate owns the wire types for
//! that contract and the pure derivation that turns a raw session into a
//! display-ready, uniquely-identified version list with a current selection.

pub mod error;
pub mod model;
pub mod reconcile;

pub use error::CanvasError;
pub use model::{IntentData, PromptComponents, Session, Version, VersionRecord};
pub use reconcile::{reconcile, Reconciled};

/// Version of the canvas engine
pub const CANVAS_VERSION: &str = "1.0.0";
