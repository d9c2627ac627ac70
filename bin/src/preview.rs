//! Render a diagnostics report inline against a file.
//!
//! Reads the file and a JSON report, runs the render pipeline against an
//! [`AnnotationStore`], and prints each line with its annotations appended
//! at end of line. Annotation coloring uses plain ANSI escapes; there is no
//! terminal framework between this tool and stdout.

use crate::cli::PreviewArgs;
use anyhow::{Context as _, Result};
use sable_diagnostics::{
    render, AnnotationSink, AnnotationStore, BlendMode, BufferId, BufferQuery, CurrentLine,
    CursorQuery, Diagnostic, GroupId, NamespaceRegistry, RenderOptions, ScopeId, Segment,
    Severity, SeverityFilter, SourcePolicy, Style, TextSpec,
};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;

const BUFFER: BufferId = BufferId(1);
const GROUP: GroupId = GroupId(1);

/// Single-buffer editor over the file being previewed.
struct PreviewEditor {
    store: AnnotationStore,
    line_count: u32,
    distinct_sources: usize,
    cursor_line: u32,
}

impl BufferQuery for PreviewEditor {
    fn exists(&self, buffer: BufferId) -> bool {
        buffer == BUFFER
    }

    fn is_loaded(&self, buffer: BufferId) -> bool {
        buffer == BUFFER
    }

    fn line_count(&self, _buffer: BufferId) -> u32 {
        self.line_count
    }

    fn distinct_source_count(&self, _buffer: BufferId) -> usize {
        self.distinct_sources
    }
}

impl CursorQuery for PreviewEditor {
    fn cursor_line(&self) -> u32 {
        self.cursor_line
    }
}

impl NamespaceRegistry for PreviewEditor {
    fn owner_scope(&mut self, group: GroupId) -> Option<ScopeId> {
        self.store.owner_scope(group)
    }
}

impl AnnotationSink for PreviewEditor {
    fn clear_annotations(&mut self, buffer: BufferId, scope: ScopeId) {
        self.store.clear_annotations(buffer, scope);
    }

    fn place_annotation(
        &mut self,
        buffer: BufferId,
        scope: ScopeId,
        line: u32,
        start_column: u32,
        segments: SmallVec<[Segment; 4]>,
        blend: BlendMode,
    ) {
        self.store
            .place_annotation(buffer, scope, line, start_column, segments, blend);
    }
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let report = fs::read_to_string(&args.diagnostics)
        .with_context(|| format!("reading {}", args.diagnostics.display()))?;

    let rendered = render_report(&text, &report, args)?;
    print!("{rendered}");
    Ok(())
}

/// Render `text` with the report's annotations appended per line.
pub fn render_report(text: &str, report: &str, args: &PreviewArgs) -> Result<String> {
    let mut diagnostics: Vec<Diagnostic> =
        serde_json::from_str(report).context("parsing diagnostics report")?;
    tracing::debug!("Loaded {} diagnostics from report", diagnostics.len());

    let lines: Vec<&str> = text.lines().collect();
    let distinct_sources = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.source.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let severity = args
        .severity
        .as_deref()
        .map(Severity::from_name)
        .transpose()?
        .map(|floor| SeverityFilter::Range {
            min: Some(floor),
            max: None,
        });
    let options = RenderOptions {
        prefix: TextSpec::literal(args.prefix.as_str()),
        suffix: TextSpec::literal(args.suffix.as_str()),
        spacing: args.spacing,
        source: SourcePolicy::from_label(&args.source),
        format: None,
        severity,
        code: args.code,
        current_line: CurrentLine::from_label(&args.current_line),
    };

    let mut editor = PreviewEditor {
        store: AnnotationStore::new(),
        line_count: lines.len() as u32,
        distinct_sources,
        cursor_line: args.cursor.unwrap_or(0),
    };
    match args.cursor {
        Some(_) => render::show_current_line(&mut editor, GROUP, BUFFER, &diagnostics, &options)?,
        None => render::show(&mut editor, GROUP, BUFFER, &mut diagnostics, &options)?,
    }

    let mut out = String::new();
    for (row, line) in lines.iter().enumerate() {
        out.push_str(line);
        for placement in editor.store.annotations_for_row(BUFFER, row as u32) {
            for segment in &placement.segments {
                write_segment(&mut out, segment, args.color);
            }
        }
        out.push('\n');
    }
    Ok(out)
}

fn write_segment(out: &mut String, segment: &Segment, color: bool) {
    match segment.style.filter(|_| color) {
        Some(style) => {
            let _ = write!(out, "\x1b[{}m{}\x1b[0m", ansi_code(style), segment.text);
        }
        None => out.push_str(&segment.text),
    }
}

fn ansi_code(style: Style) -> &'static str {
    match style {
        Style::Error => "31",
        Style::Warning => "33",
        Style::Information => "34",
        Style::Hint => "90",
    }
}
