//! Canvas Studio: the in-memory state for one page visit.
//!
//! One creative thread at a time, one outstanding request per operation,
//! and a session that is only ever replaced wholesale after a successful
//! round trip. The transient clip recorded on the creation view travels to
//! the studio through an explicit [`AudioHandoff`] rather than a global.

pub mod flow;
pub mod handoff;

pub use flow::StudioFlow;
pub use handoff::AudioHandoff;
