//! The project journal. Computes where the project stands today, renders the current-state
//! documents and maintains the append-only logs.
//!
//!  - [calendar], [tables], [progress] and [blockers] are pure lookups feeding [status].
//!  - [report] renders documents that are rewritten each morning.
//!  - [log] owns the documents that only ever grow.

pub mod archive;
pub mod blockers;
pub mod calendar;
pub mod commit;
pub mod log;
pub mod progress;
pub mod report;
pub mod session;
pub mod status;
pub mod tables;
