//! Display segments and per-line composition.
//!
//! A line's annotation is an ordered run of [`Segment`]s: a spacer, one
//! marker per diagnostic on the line, and a single trailing message taken
//! from the last diagnostic in the group.

use crate::diagnostic::{Diagnostic, Severity};
use crate::render::RenderOptions;
use smallvec::SmallVec;
use std::fmt;

/// Style class an annotation segment is painted with.
///
/// One class per severity; the spacer carries no style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Error,
    Warning,
    Information,
    Hint,
}

impl From<Severity> for Style {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Style::Error,
            Severity::Warning => Style::Warning,
            Severity::Information => Style::Information,
            Severity::Hint => Style::Hint,
        }
    }
}

/// One styled piece of annotation text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Option<Style>,
}

impl Segment {
    fn unstyled(text: String) -> Self {
        Segment { text, style: None }
    }

    fn styled(text: String, severity: Severity) -> Self {
        Segment {
            text,
            style: Some(Style::from(severity)),
        }
    }
}

/// A literal string, or one computed per diagnostic.
///
/// Covers the prefix and suffix options: a fixed marker symbol, or a
/// function of the diagnostic it marks.
pub enum TextSpec {
    Literal(String),
    Computed(Box<dyn Fn(&Diagnostic) -> String + Send + Sync>),
}

impl TextSpec {
    pub fn literal(text: impl Into<String>) -> Self {
        TextSpec::Literal(text.into())
    }

    pub fn computed(f: impl Fn(&Diagnostic) -> String + Send + Sync + 'static) -> Self {
        TextSpec::Computed(Box::new(f))
    }

    /// Resolve against `diagnostic`.
    pub fn resolve(&self, diagnostic: &Diagnostic) -> String {
        match self {
            TextSpec::Literal(text) => text.clone(),
            TextSpec::Computed(f) => f(diagnostic),
        }
    }
}

impl Default for TextSpec {
    fn default() -> Self {
        TextSpec::Literal(String::new())
    }
}

impl fmt::Debug for TextSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSpec::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            TextSpec::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Compose the segment run for one line's diagnostic group.
///
/// Returns `None` when there is nothing to show: an empty group, or a last
/// diagnostic with an empty message. Otherwise the run is a spacer of
/// `options.spacing` blanks, one marker per diagnostic carrying the resolved
/// prefix, and the last diagnostic's message with carriage returns stripped,
/// newlines collapsed to two spaces, and the resolved suffix appended.
pub fn build_segments(
    line_diagnostics: &[Diagnostic],
    options: &RenderOptions,
) -> Option<SmallVec<[Segment; 4]>> {
    let last = line_diagnostics.last()?;
    if last.message.is_empty() {
        return None;
    }

    let mut segments = SmallVec::new();
    segments.push(Segment::unstyled(" ".repeat(options.spacing)));

    for diagnostic in line_diagnostics {
        segments.push(Segment::styled(
            options.prefix.resolve(diagnostic),
            diagnostic.severity,
        ));
    }

    let body = match last.code.as_deref() {
        Some(code) if options.code => format!("{code}: {}", last.message),
        _ => last.message.clone(),
    };
    let mut text = body.replace('\r', "").replace('\n', "  ");
    text.push_str(&options.suffix.resolve(last));
    segments.push(Segment::styled(text, last.severity));

    Some(segments)
}
