//! Collaborator contracts the render pipeline depends on.
//!
//! The pipeline arranges and formats diagnostics; it does not own buffer
//! text, cursor state, or the primitive that paints annotation text. Those
//! live behind the traits here, implemented by the embedding editor, or by
//! [`AnnotationStore`](crate::store::AnnotationStore) where no native
//! annotation primitive exists.

use crate::segment::Segment;
use smallvec::SmallVec;

/// Handle for a text buffer held by the embedding editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u64);

/// Logical owner of a set of placed annotations.
///
/// Clearing is always scoped by `(BufferId, GroupId)`; no two groups may
/// observe or mutate each other's placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub u64);

/// Editor-level sub-namespace a [`GroupId`] resolves to.
///
/// This is the raw clearing granularity. [`hide`](crate::render::hide) goes
/// through the group indirection instead; callers holding a `ScopeId` can
/// clear at this level directly via [`AnnotationSink::clear_annotations`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u64);

/// How placed annotation text interacts with highlights already on the line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Combine with existing line highlights.
    #[default]
    Combine,
    /// Replace existing line highlights.
    Replace,
}

/// Read-only buffer queries.
pub trait BufferQuery {
    /// Whether `buffer` is a handle this editor has issued.
    fn exists(&self, buffer: BufferId) -> bool;

    /// Whether `buffer` is currently loaded and addressable.
    ///
    /// Buffers routinely unload between scheduling and execution of a
    /// render; rendering into an unloaded buffer is a silent no-op.
    fn is_loaded(&self, buffer: BufferId) -> bool;

    /// Number of lines currently in `buffer`.
    fn line_count(&self, buffer: BufferId) -> u32;

    /// Count of distinct diagnostic sources currently present in `buffer`.
    ///
    /// Drives the `if_many` source-prefixing policy.
    fn distinct_source_count(&self, buffer: BufferId) -> usize;
}

/// Cursor position of the active view.
pub trait CursorQuery {
    /// Current cursor line, 0-based.
    fn cursor_line(&self) -> u32;
}

/// Maps logical groups to the concrete scope used for placing and clearing.
pub trait NamespaceRegistry {
    /// Resolve `group` to its scope. Registries that allocate lazily may
    /// create the scope here. `None` means the handle is invalid.
    fn owner_scope(&mut self, group: GroupId) -> Option<ScopeId>;
}

/// Receives placement and clearing commands.
pub trait AnnotationSink {
    /// Remove every annotation placed under `scope` in `buffer`.
    fn clear_annotations(&mut self, buffer: BufferId, scope: ScopeId);

    /// Attach `segments` to `line` in `buffer` under `scope`.
    fn place_annotation(
        &mut self,
        buffer: BufferId,
        scope: ScopeId,
        line: u32,
        start_column: u32,
        segments: SmallVec<[Segment; 4]>,
        blend: BlendMode,
    );
}
