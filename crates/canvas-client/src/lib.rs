//! Canvas Client: dispatch against the generative backend.
//!
//! Three mutations (generate, refine, reimagine), one read of descriptive
//! text, and one session fetch. Each call packages its input into a single
//! outbound request and returns the backend's latest [`Session`] wholesale;
//! nothing here retries, caches, or edits a session locally.

pub mod client;
pub mod instruction;

pub use client::CanvasClient;
pub use instruction::{Instruction, InstructionInput};
