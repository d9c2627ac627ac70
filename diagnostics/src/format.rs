//! Message formatting applied ahead of composition.
//!
//! Both steps produce rewritten clones; the originals are never mutated, so
//! a formatter always sees the producer's message text, not the output of an
//! earlier step in the same call.

use crate::diagnostic::Diagnostic;

/// Caller-supplied message transform.
pub type FormatFn = Box<dyn Fn(&Diagnostic) -> String + Send + Sync>;

/// When to prefix messages with their diagnostic's source label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourcePolicy {
    /// Never prefix.
    #[default]
    Never,
    /// Prefix only when the buffer currently holds diagnostics from more
    /// than one distinct source.
    IfMany,
    /// Always prefix.
    Always,
}

impl SourcePolicy {
    /// Map a config label to a policy. Unrecognized labels disable
    /// prefixing.
    pub fn from_label(label: &str) -> Self {
        match label {
            "always" => SourcePolicy::Always,
            "if_many" => SourcePolicy::IfMany,
            _ => SourcePolicy::Never,
        }
    }
}

/// Replace each message with `format(diagnostic)`.
///
/// The transform is applied to the original record, then written into a
/// clone.
pub fn apply_format(format: &FormatFn, diagnostics: &[Diagnostic]) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .map(|diagnostic| {
            let mut copy = diagnostic.clone();
            copy.message = format(diagnostic);
            copy
        })
        .collect()
}

/// Prefix each message with its diagnostic's source label.
///
/// Diagnostics without a source (or with an empty one) pass through
/// unchanged. Whether to call this at all is the caller's decision, made
/// from [`SourcePolicy`] and the buffer's distinct source count.
pub fn prefix_source(diagnostics: &[Diagnostic]) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .map(|diagnostic| match diagnostic.source.as_deref() {
            Some(source) if !source.is_empty() => {
                let mut copy = diagnostic.clone();
                copy.message = format!("{source}: {}", diagnostic.message);
                copy
            }
            _ => diagnostic.clone(),
        })
        .collect()
}
