//! Core types for representing source files and locations.
//!
//! Every AST node carries a [`Span`], which pairs a [`FileID`] with the
//! start/end [`Position`] of the construct in that file (spec invariant: every
//! node knows its source location). The [`SourceManager`] owns the text of
//! every file involved in a compilation and is the sole place line/column
//! lookups happen, so that the rest of the compiler operates on comparable
//! byte offsets internally.

use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// A unique identifier for a source file, assigned by a [`SourceManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileID(usize);

impl FileID {
    /// Creates a new `FileID` with the given value.
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the inner value of the `FileID`.
    #[must_use]
    pub const fn value(&self) -> usize { self.0 }
}

impl fmt::Display for FileID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "file:{}", self.0) }
}

/// A 1-indexed line/column position with a 0-indexed byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the file (0-indexed)
    pub offset: usize,
}

impl Position {
    /// Creates a new position with the given line, column, and byte offset.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Creates a new position at the start of a file (line 1, column 1, offset 0).
    #[must_use]
    pub const fn start_of_file() -> Self { Self { line: 1, column: 1, offset: 0 } }

    /// Returns true if this position precedes the other position.
    #[must_use]
    pub const fn precedes(&self, other: &Self) -> bool { self.offset < other.offset }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source span: a file identifier plus the start and end positions within
/// it. This is the location type every AST node, token, and diagnostic
/// carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// File the span refers to.
    pub file_id: FileID,
    /// Starting position of the span (inclusive).
    pub start: Position,
    /// Ending position of the span (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new span with the given start and end positions and file ID.
    #[must_use]
    pub const fn new(file_id: FileID, start: Position, end: Position) -> Self {
        Self { file_id, start, end }
    }

    /// A span with no useful location, for synthesized nodes that have no
    /// direct source counterpart.
    #[must_use]
    pub const fn synthetic() -> Self {
        let zero = Position::new(0, 0, 0);
        Self { file_id: FileID(0), start: zero, end: zero }
    }

    /// Returns the byte range of this span.
    #[must_use]
    pub const fn byte_range(&self) -> Range<usize> { self.start.offset..self.end.offset }

    /// Creates a new span that encompasses both input spans.
    ///
    /// ## Panics
    ///
    /// Panics if the spans are from different files.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        assert_eq!(self.file_id, other.file_id, "cannot combine spans from different files");

        let start = if self.start.precedes(&other.start) { self.start } else { other.start };
        let end = if self.end.precedes(&other.end) { other.end } else { self.end };

        Self { file_id: self.file_id, start, end }
    }
}

impl Default for Span {
    fn default() -> Self { Self::synthetic() }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.file_id, self.start, self.end)
    }
}

/// A parsed source file: its name, optional on-disk path, content, and
/// precomputed line-start offsets for O(log n) byte-offset-to-position
/// lookups.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Identifier of the file
    pub id: FileID,
    /// Name of the file (usually a path), as it should appear in diagnostics.
    pub name: String,
    /// Path to the file on disk, if it was loaded from one.
    pub path: Option<PathBuf>,
    /// Content of the file.
    pub content: String,
    /// Byte offsets of line starts (0-indexed, first entry is always 0).
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Creates a new source file with the given ID, name, and content.
    #[must_use]
    pub fn new(id: FileID, name: String, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self { id, name, path: None, content, line_starts }
    }

    /// Creates a new source file with the given ID, name, path, and content.
    #[must_use]
    pub fn with_path(id: FileID, name: String, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self { id, name, path: Some(path), content, line_starts }
    }

    /// Converts a byte offset to a [`Position`].
    ///
    /// ## Panics
    ///
    /// Panics if the byte offset is greater than the length of the file's content.
    #[must_use]
    pub fn position_from_offset(&self, byte_offset: usize) -> Position {
        assert!(
            byte_offset <= self.content.len(),
            "byte offset {} out of range for file with length {}",
            byte_offset,
            self.content.len()
        );

        match self.line_starts.binary_search(&byte_offset) {
            Ok(line) => Position::new(line + 1, 1, byte_offset),
            Err(line) => {
                let line = line - 1;
                let line_start_offset = self.line_starts[line];
                let column = byte_offset - line_start_offset + 1;

                Position::new(line + 1, column, byte_offset)
            }
        }
    }

    /// Builds a [`Span`] spanning `[start, end)` byte offsets in this file.
    #[must_use]
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.id, self.position_from_offset(start), self.position_from_offset(end))
    }

    /// Returns the text covered by the given span.
    ///
    /// ## Panics
    ///
    /// Panics if the span belongs to a different file.
    #[must_use]
    pub fn text_at_span(&self, span: Span) -> &str {
        assert_eq!(span.file_id, self.id, "span is from a different file");
        &self.content[span.byte_range()]
    }

    /// Returns the line of text containing the given position.
    ///
    /// ## Panics
    ///
    /// Panics if the position's line is out of range for this file.
    #[must_use]
    pub fn line_at_position(&self, position: Position) -> &str {
        let line_idx = position.line - 1;
        assert!(line_idx < self.line_starts.len(), "line index out of bounds");

        let start_offset = self.line_starts[line_idx];
        let end_offset = if line_idx + 1 < self.line_starts.len() {
            self.line_starts[line_idx + 1] - 1 // exclude the newline
        } else {
            self.content.len()
        };

        &self.content[start_offset..end_offset]
    }
}

fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            line_starts.push(i + 1);
        }
    }
    line_starts
}

/// Canonicalizes a filesystem path the way the import pass needs to: used as
/// the module registry's key so that two import statements reaching the same
/// file (via different relative paths) resolve to one cache entry.
#[must_use]
pub fn canonical_key(path: &std::path::Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Owns the text of every source file touched by a compilation and assigns
/// each a stable [`FileID`].
///
/// Reused across the whole compilation (including recursively-imported
/// modules) so that every [`Span`] emitted anywhere can be resolved back to
/// file content for diagnostic rendering.
#[derive(Debug, Default)]
pub struct SourceManager {
    files: FxHashMap<FileID, SourceFile>,
    next_id: usize,
}

impl SourceManager {
    /// Creates a new empty `SourceManager`.
    #[must_use]
    pub fn new() -> Self { Self { files: FxHashMap::default(), next_id: 1 } }

    /// Adds a new source file and returns its `FileID`.
    pub fn add_file(&mut self, name: String, content: String) -> FileID {
        let id = FileID::new(self.next_id);
        self.next_id += 1;
        let file = SourceFile::new(id, name, content);
        let _ = self.files.insert(id, file);
        id
    }

    /// Adds a new source file with a path and returns its `FileID`.
    pub fn add_file_with_path(&mut self, name: String, path: PathBuf, content: String) -> FileID {
        let id = FileID::new(self.next_id);
        self.next_id += 1;
        let file = SourceFile::with_path(id, name, path, content);
        let _ = self.files.insert(id, file);
        id
    }

    /// Returns the source file with the given ID, if it exists.
    #[must_use]
    pub fn get_file(&self, id: FileID) -> Option<&SourceFile> { self.files.get(&id) }

    /// Finds the `FileID` already registered for a canonical filesystem path,
    /// if any. Used by the import pass to reuse a previously-parsed module.
    #[must_use]
    pub fn find_by_path(&self, path: &std::path::Path) -> Option<FileID> {
        self.files.values().find(|f| f.path.as_deref() == Some(path)).map(|f| f.id)
    }

    /// Returns the text covered by the given span, if the file exists.
    #[must_use]
    pub fn text_at_span(&self, span: Span) -> Option<&str> {
        self.get_file(span.file_id).map(|file| file.text_at_span(span))
    }

    /// Returns the line of text containing the given position, if the file exists.
    #[must_use]
    pub fn line_at_position(&self, file_id: FileID, position: Position) -> Option<&str> {
        self.get_file(file_id).map(|file| file.line_at_position(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_from_offset_finds_line_and_column() {
        let file = SourceFile::new(FileID::new(1), "t.jac".into(), "abc\ndef\nghi".into());
        assert_eq!(file.position_from_offset(0), Position::new(1, 1, 0));
        assert_eq!(file.position_from_offset(4), Position::new(2, 1, 4));
        assert_eq!(file.position_from_offset(9), Position::new(3, 2, 9));
    }

    #[test]
    fn span_combine_takes_the_outer_bounds() {
        let file = SourceFile::new(FileID::new(1), "t.jac".into(), "0123456789".into());
        let a = file.span(2, 4);
        let b = file.span(6, 8);
        let combined = a.combine(&b);
        assert_eq!(combined.start.offset, 2);
        assert_eq!(combined.end.offset, 8);
    }

    #[test]
    fn source_manager_reuses_file_by_canonical_path() {
        let mut mgr = SourceManager::new();
        let path = PathBuf::from("/tmp/does/not/matter.jac");
        let id = mgr.add_file_with_path("matter.jac".into(), path.clone(), "x = 1".into());
        assert_eq!(mgr.find_by_path(&path), Some(id));
    }
}
