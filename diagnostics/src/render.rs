//! The per-call render pipeline.
//!
//! Every call rebuilds its output from scratch: prior annotations owned by
//! the group are cleared before anything new is placed, so repeated renders
//! of the same `(group, buffer)` pair never accumulate. Ordering across
//! lines carries no meaning to the caller; only the final visible state
//! does.

use crate::diagnostic::{Diagnostic, SeverityFilter};
use crate::editor::{
    AnnotationSink, BlendMode, BufferId, BufferQuery, CursorQuery, GroupId, NamespaceRegistry,
};
use crate::error::{Error, Result};
use crate::filter::{self, CurrentLine};
use crate::format::{self, FormatFn, SourcePolicy};
use crate::segment::{self, TextSpec};

/// Per-call configuration for [`show`].
pub struct RenderOptions {
    /// Marker placed ahead of the message, once per diagnostic on the line.
    pub prefix: TextSpec,
    /// Appended to the composed message.
    pub suffix: TextSpec,
    /// Blank columns between buffer text and the annotation.
    pub spacing: usize,
    /// Source-label prefixing policy.
    pub source: SourcePolicy,
    /// Message transform applied before composition.
    pub format: Option<FormatFn>,
    /// Severity filter, reapplied per line.
    pub severity: Option<SeverityFilter>,
    /// Prepend the diagnostic's code to its message.
    pub code: bool,
    /// Cursor-relative policy used by [`show_current_line`].
    pub current_line: CurrentLine,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            prefix: TextSpec::default(),
            suffix: TextSpec::default(),
            spacing: 4,
            source: SourcePolicy::default(),
            format: None,
            severity: None,
            code: false,
            current_line: CurrentLine::default(),
        }
    }
}

/// Render `diagnostics` as inline annotations owned by `group` in `buffer`.
///
/// Prior annotations owned by the group are cleared unconditionally once the
/// buffer checks pass, even when the new list is empty. The caller's list is
/// stably sorted in place by `(line, column)`; formatting steps work on
/// clones and never rewrite the caller's records. Lines at or beyond the end
/// of the buffer are skipped silently, since diagnostics can reference a
/// stale buffer snapshot.
pub fn show<E>(
    editor: &mut E,
    group: GroupId,
    buffer: BufferId,
    diagnostics: &mut [Diagnostic],
    options: &RenderOptions,
) -> Result<()>
where
    E: BufferQuery + NamespaceRegistry + AnnotationSink,
{
    let scope = editor.owner_scope(group).ok_or(Error::UnknownGroup(group))?;
    if !editor.exists(buffer) {
        return Err(Error::UnknownBuffer(buffer));
    }
    if !editor.is_loaded(buffer) {
        tracing::debug!("Skipping render into unloaded buffer: {:?}", buffer);
        return Ok(());
    }

    editor.clear_annotations(buffer, scope);
    if diagnostics.is_empty() {
        return Ok(());
    }

    diagnostics.sort_by_key(|diagnostic| (diagnostic.line, diagnostic.column));

    // The severity filter also runs per line below; filtering up front keeps
    // dropped diagnostics away from the formatting steps.
    let filtered = filter::by_severity(options.severity.as_ref(), diagnostics);
    let mut working = match &options.format {
        Some(format) => format::apply_format(format, &filtered),
        None => filtered,
    };
    let prefix_sources = match options.source {
        SourcePolicy::Always => true,
        SourcePolicy::IfMany => editor.distinct_source_count(buffer) > 1,
        SourcePolicy::Never => false,
    };
    if prefix_sources {
        working = format::prefix_source(&working);
    }

    let line_count = editor.line_count(buffer);
    let mut placed = 0usize;
    for (line, group_diagnostics) in filter::group_by_line(&working) {
        let retained = filter::by_severity(options.severity.as_ref(), &group_diagnostics);
        let Some(segments) = segment::build_segments(&retained, options) else {
            continue;
        };
        if line >= line_count {
            // Buffer may have shrunk since the diagnostics were computed.
            tracing::trace!("Skipping line {} past end of buffer ({} lines)", line, line_count);
            continue;
        }
        editor.place_annotation(buffer, scope, line, 0, segments, BlendMode::Combine);
        placed += 1;
    }
    tracing::debug!(
        "Placed annotations on {} lines for group {:?} in buffer {:?}",
        placed,
        group,
        buffer
    );
    Ok(())
}

/// Render only the diagnostics selected by the cursor-relative policy.
///
/// Reads the active view's cursor line, filters with
/// `options.current_line`, and delegates to [`show`], so a policy that
/// filters everything out still clears the group's prior output.
pub fn show_current_line<E>(
    editor: &mut E,
    group: GroupId,
    buffer: BufferId,
    diagnostics: &[Diagnostic],
    options: &RenderOptions,
) -> Result<()>
where
    E: BufferQuery + CursorQuery + NamespaceRegistry + AnnotationSink,
{
    let cursor_line = editor.cursor_line();
    let mut filtered = filter::by_current_line(diagnostics, cursor_line, options.current_line);
    show(editor, group, buffer, &mut filtered, options)
}

/// Remove every annotation owned by `group` in `buffer`.
///
/// Idempotent: succeeds even when nothing was placed.
pub fn hide<E>(editor: &mut E, group: GroupId, buffer: BufferId) -> Result<()>
where
    E: NamespaceRegistry + AnnotationSink,
{
    let scope = editor.owner_scope(group).ok_or(Error::UnknownGroup(group))?;
    editor.clear_annotations(buffer, scope);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::test::FakeEditor;

    fn diag(line: u32, column: u32, severity: Severity, message: &str) -> Diagnostic {
        Diagnostic {
            line,
            end_line: None,
            column,
            severity,
            message: message.to_string(),
            source: None,
            code: None,
        }
    }

    #[test]
    fn show_sorts_the_callers_list_in_place() {
        let mut editor = FakeEditor::new();
        let buffer = editor.add_buffer(1, 10);
        let mut diagnostics = vec![
            diag(5, 0, Severity::Error, "later"),
            diag(2, 7, Severity::Warning, "tie b"),
            diag(2, 3, Severity::Warning, "tie a"),
        ];

        show(
            &mut editor,
            GroupId(1),
            buffer,
            &mut diagnostics,
            &RenderOptions::default(),
        )
        .unwrap();

        let order: Vec<_> = diagnostics
            .iter()
            .map(|d| (d.line, d.column))
            .collect();
        assert_eq!(order, vec![(2, 3), (2, 7), (5, 0)]);
    }

    #[test]
    fn show_into_unloaded_buffer_is_a_silent_no_op() {
        let mut editor = FakeEditor::new();
        let buffer = editor.add_buffer(1, 10);
        editor.unload(buffer);

        let mut diagnostics = vec![diag(0, 0, Severity::Error, "bad")];
        show(
            &mut editor,
            GroupId(1),
            buffer,
            &mut diagnostics,
            &RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(editor.store.annotations_for_row(buffer, 0).count(), 0);
    }

    #[test]
    fn show_into_unknown_buffer_fails_before_clearing() {
        let mut editor = FakeEditor::new();
        let buffer = editor.add_buffer(1, 10);
        let mut diagnostics = vec![diag(0, 0, Severity::Error, "keep me")];
        show(
            &mut editor,
            GroupId(1),
            buffer,
            &mut diagnostics,
            &RenderOptions::default(),
        )
        .unwrap();

        let err = show(
            &mut editor,
            GroupId(1),
            BufferId(99),
            &mut diagnostics,
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, Error::UnknownBuffer(BufferId(99)));

        // The failed call must not have cleared the earlier placement.
        assert_eq!(editor.store.annotations_for_row(buffer, 0).count(), 1);
    }

    #[test]
    fn per_line_severity_filter_is_reapplied() {
        let mut editor = FakeEditor::new();
        let buffer = editor.add_buffer(1, 10);
        let mut diagnostics = vec![
            diag(0, 0, Severity::Error, "keep"),
            diag(1, 0, Severity::Hint, "drop"),
        ];
        let options = RenderOptions {
            severity: Some(SeverityFilter::Exact(Severity::Error)),
            ..RenderOptions::default()
        };

        show(&mut editor, GroupId(1), buffer, &mut diagnostics, &options).unwrap();

        assert_eq!(editor.store.annotations_for_row(buffer, 0).count(), 1);
        assert_eq!(editor.store.annotations_for_row(buffer, 1).count(), 0);
    }

    #[test]
    fn hide_is_idempotent() {
        let mut editor = FakeEditor::new();
        let buffer = editor.add_buffer(1, 10);

        hide(&mut editor, GroupId(1), buffer).unwrap();

        let mut diagnostics = vec![diag(0, 0, Severity::Error, "bad")];
        show(
            &mut editor,
            GroupId(1),
            buffer,
            &mut diagnostics,
            &RenderOptions::default(),
        )
        .unwrap();
        hide(&mut editor, GroupId(1), buffer).unwrap();
        hide(&mut editor, GroupId(1), buffer).unwrap();

        assert_eq!(editor.store.annotations_for_row(buffer, 0).count(), 0);
    }
}
