//! Inline diagnostic annotations for the sable editor.
//!
//! Takes diagnostics supplied by external producers (linters, compilers,
//! language servers) and arranges them as inline annotations attached to
//! buffer lines: severity and cursor-relative filtering, per-line grouping,
//! message formatting, and segment composition. The editor side (buffer
//! text, cursor state, the primitive that paints annotation text) stays
//! behind the traits in [`editor`].
//!
//! The entry points are [`render::show`], [`render::show_current_line`],
//! and [`render::hide`]. Each call fully replaces the prior output of its
//! `(group, buffer)` pair, so re-rendering on every diagnostics update or
//! cursor move is safe and leaks nothing.

pub mod diagnostic;
pub mod editor;
pub mod error;
pub mod filter;
pub mod format;
pub mod render;
pub mod segment;
pub mod store;


pub use diagnostic::{Diagnostic, Severity, SeverityFilter};
pub use editor::{
    AnnotationSink, BlendMode, BufferId, BufferQuery, CursorQuery, GroupId, NamespaceRegistry,
    ScopeId,
};
pub use error::{Error, Result};
pub use filter::CurrentLine;
pub use format::{FormatFn, SourcePolicy};
pub use render::RenderOptions;
pub use segment::{Segment, Style, TextSpec};
pub use store::{AnnotationStore, PlacedAnnotation};
