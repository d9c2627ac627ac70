//! Diagnostic filtering and line grouping.
//!
//! All functions here are pure: they return new sequences and leave their
//! input untouched.

use crate::diagnostic::{Diagnostic, SeverityFilter};
use rustc_hash::FxHashMap;

/// Cursor-relative visibility policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurrentLine {
    /// No cursor-relative filtering.
    #[default]
    Off,
    /// Drop diagnostics covering the cursor line.
    Hide,
    /// Keep only diagnostics covering the cursor line.
    Only,
}

impl CurrentLine {
    /// Map a config label to a policy.
    ///
    /// Unrecognized labels mean no filtering, matching how an absent policy
    /// behaves.
    pub fn from_label(label: &str) -> Self {
        match label {
            "hide" => CurrentLine::Hide,
            "only" => CurrentLine::Only,
            _ => CurrentLine::Off,
        }
    }
}

/// Keep the diagnostics admitted by `filter`, preserving relative order.
///
/// A `None` filter passes everything through.
pub fn by_severity(
    filter: Option<&SeverityFilter>,
    diagnostics: &[Diagnostic],
) -> Vec<Diagnostic> {
    match filter {
        Some(filter) => diagnostics
            .iter()
            .filter(|diagnostic| filter.admits(diagnostic.severity))
            .cloned()
            .collect(),
        None => diagnostics.to_vec(),
    }
}

/// Apply a cursor-relative policy.
///
/// Coverage uses the inclusive `[line, end_line]` range when `end_line` is
/// present, otherwise exact line equality.
pub fn by_current_line(
    diagnostics: &[Diagnostic],
    cursor_line: u32,
    policy: CurrentLine,
) -> Vec<Diagnostic> {
    match policy {
        CurrentLine::Off => diagnostics.to_vec(),
        CurrentLine::Hide => diagnostics
            .iter()
            .filter(|diagnostic| !diagnostic.covers_line(cursor_line))
            .cloned()
            .collect(),
        CurrentLine::Only => diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.covers_line(cursor_line))
            .cloned()
            .collect(),
    }
}

/// Partition diagnostics into per-line groups, preserving arrival order
/// within each line.
pub fn group_by_line(diagnostics: &[Diagnostic]) -> FxHashMap<u32, Vec<Diagnostic>> {
    let mut groups: FxHashMap<u32, Vec<Diagnostic>> = FxHashMap::default();
    for diagnostic in diagnostics {
        groups
            .entry(diagnostic.line)
            .or_default()
            .push(diagnostic.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    fn diag(line: u32, severity: Severity, message: &str) -> Diagnostic {
        Diagnostic {
            line,
            end_line: None,
            column: 0,
            severity,
            message: message.to_string(),
            source: None,
            code: None,
        }
    }

    #[test]
    fn scalar_severity_keeps_exact_matches_in_order() {
        let diagnostics = vec![
            diag(0, Severity::Error, "a"),
            diag(1, Severity::Warning, "b"),
            diag(2, Severity::Warning, "c"),
            diag(3, Severity::Hint, "d"),
        ];
        let filter = SeverityFilter::Exact(Severity::Warning);
        let kept = by_severity(Some(&filter), &diagnostics);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].message, "b");
        assert_eq!(kept[1].message, "c");
    }

    #[test]
    fn default_range_is_a_pass_through() {
        let diagnostics = vec![
            diag(0, Severity::Error, "a"),
            diag(1, Severity::Hint, "b"),
        ];
        let filter = SeverityFilter::Range {
            min: None,
            max: None,
        };
        assert_eq!(by_severity(Some(&filter), &diagnostics), diagnostics);
    }

    #[test]
    fn absent_filter_is_a_pass_through() {
        let diagnostics = vec![diag(0, Severity::Error, "a")];
        assert_eq!(by_severity(None, &diagnostics), diagnostics);
    }

    #[test]
    fn group_by_line_on_empty_input() {
        assert!(group_by_line(&[]).is_empty());
    }

    #[test]
    fn group_by_line_preserves_input_order_within_line() {
        let diagnostics = vec![
            diag(3, Severity::Error, "first on 3"),
            diag(1, Severity::Warning, "on 1"),
            diag(3, Severity::Hint, "second on 3"),
        ];
        let groups = group_by_line(&diagnostics);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&1].len(), 1);
        assert_eq!(groups[&3].len(), 2);
        assert_eq!(groups[&3][0].message, "first on 3");
        assert_eq!(groups[&3][1].message, "second on 3");
    }

    #[test]
    fn hide_drops_diagnostics_covering_the_cursor() {
        let mut ranged = diag(3, Severity::Error, "ranged");
        ranged.end_line = Some(6);
        let diagnostics = vec![
            diag(2, Severity::Warning, "off cursor"),
            diag(4, Severity::Error, "on cursor"),
            ranged,
        ];

        let kept = by_current_line(&diagnostics, 4, CurrentLine::Hide);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].message, "off cursor");
    }

    #[test]
    fn only_keeps_diagnostics_covering_the_cursor() {
        let mut ranged = diag(3, Severity::Error, "ranged");
        ranged.end_line = Some(6);
        let diagnostics = vec![
            diag(2, Severity::Warning, "off cursor"),
            diag(4, Severity::Error, "on cursor"),
            ranged,
        ];

        let kept = by_current_line(&diagnostics, 4, CurrentLine::Only);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].message, "on cursor");
        assert_eq!(kept[1].message, "ranged");
    }

    #[test]
    fn off_policy_passes_everything_through() {
        let diagnostics = vec![diag(4, Severity::Error, "on cursor")];
        assert_eq!(
            by_current_line(&diagnostics, 4, CurrentLine::Off),
            diagnostics
        );
    }

    #[test]
    fn unknown_policy_label_maps_to_off() {
        assert_eq!(CurrentLine::from_label("hide"), CurrentLine::Hide);
        assert_eq!(CurrentLine::from_label("only"), CurrentLine::Only);
        assert_eq!(CurrentLine::from_label("focus"), CurrentLine::Off);
        assert_eq!(CurrentLine::from_label(""), CurrentLine::Off);
    }
}
