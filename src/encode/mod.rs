//! Output side of the pipeline.
//!
//! Sequences are serialized back to GIF bytes and written to disk in one step.

/// Atomic file output.
pub mod output;
/// GIF container encoding.
pub mod writer;
