//! In-memory annotation bookkeeping.
//!
//! Editors embedding the pipeline normally route placement into their own
//! annotation primitive. Where none exists (and in this crate's tests and
//! the preview binary), [`AnnotationStore`] stands in: it implements the
//! registry and sink contracts over a `(buffer, scope)`-keyed map and
//! supports row queries.

use crate::editor::{
    AnnotationSink, BlendMode, BufferId, GroupId, NamespaceRegistry, ScopeId,
};
use crate::segment::Segment;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// One placed annotation: a segment run attached to a buffer line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedAnnotation {
    pub line: u32,
    pub start_column: u32,
    pub segments: SmallVec<[Segment; 4]>,
    pub blend: BlendMode,
}

/// `(buffer, scope)`-keyed store of placed annotations.
///
/// Scopes are allocated lazily, one per group; clearing one scope never
/// touches another's placements.
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    scopes: FxHashMap<GroupId, ScopeId>,
    next_scope: u64,
    placements: FxHashMap<(BufferId, ScopeId), Vec<PlacedAnnotation>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        AnnotationStore::default()
    }

    /// All annotations placed under `scope` in `buffer`, in placement order.
    pub fn annotations(&self, buffer: BufferId, scope: ScopeId) -> &[PlacedAnnotation] {
        self.placements
            .get(&(buffer, scope))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All annotations on `row` in `buffer`, across every scope.
    pub fn annotations_for_row<'a>(
        &'a self,
        buffer: BufferId,
        row: u32,
    ) -> impl Iterator<Item = &'a PlacedAnnotation> + 'a {
        self.placements
            .iter()
            .filter(move |((placed_buffer, _), _)| *placed_buffer == buffer)
            .flat_map(|(_, placements)| placements.iter())
            .filter(move |placement| placement.line == row)
    }

    /// Total number of annotations placed in `buffer`, across every scope.
    pub fn annotation_count(&self, buffer: BufferId) -> usize {
        self.placements
            .iter()
            .filter(|((placed_buffer, _), _)| *placed_buffer == buffer)
            .map(|(_, placements)| placements.len())
            .sum()
    }
}

impl NamespaceRegistry for AnnotationStore {
    fn owner_scope(&mut self, group: GroupId) -> Option<ScopeId> {
        let next_scope = &mut self.next_scope;
        Some(*self.scopes.entry(group).or_insert_with(|| {
            *next_scope += 1;
            ScopeId(*next_scope)
        }))
    }
}

impl AnnotationSink for AnnotationStore {
    fn clear_annotations(&mut self, buffer: BufferId, scope: ScopeId) {
        self.placements.remove(&(buffer, scope));
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
        self.placements
            .entry((buffer, scope))
            .or_default()
            .push(PlacedAnnotation {
                line,
                start_column,
                segments,
                blend,
            });
    }
}
