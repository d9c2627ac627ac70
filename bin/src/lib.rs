//! sable command-line tools.
//!
//! Currently a single `preview` command that renders a producer's JSON
//! diagnostics report inline against a file, using the same pipeline the
//! editor embeds.

pub mod cli;
pub mod preview;
