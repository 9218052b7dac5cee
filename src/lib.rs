//! Daily routines for a long running research project. The morning routine prepares today's
//! context documents, the evening routine records what happened and commits it, and everything in
//! between only reads the project's files and its git history.
//!

pub mod cli;
pub mod config;
pub mod fs;
pub mod journal;
pub mod utils;
pub mod vcs;
