//! Source files and global offsets.
//!
//! Every file registered in a [`SourceMap`] is assigned a disjoint range of
//! global offsets. Spans throughout the tree use these offsets, which lets a
//! diagnostic be located by its span alone.

use std::fmt;

use crate::{FileId, Span};

/// Line start table for one file, local offsets.
#[derive(Clone, Debug, Default)]
struct LineOffsets {
    /// offsets[0] = 0, offsets[n] = byte after the n-th newline.
    offsets: Vec<u32>,
}

impl LineOffsets {
    fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsets { offsets }
    }

    /// 0-based line index containing `offset`.
    fn line_index(&self, offset: u32) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        }
    }

    fn line_start(&self, line: u32) -> Option<u32> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.offsets.get(index).copied()
    }
}

#[derive(Clone, Debug)]
struct SourceFile {
    path: String,
    text: String,
    base: u32,
    lines: LineOffsets,
}

impl SourceFile {
    fn len(&self) -> u32 {
        u32::try_from(self.text.len()).unwrap_or(u32::MAX)
    }

    fn contains(&self, offset: u32) -> bool {
        offset >= self.base && offset - self.base <= self.len()
    }
}

/// A resolved source position, 1-based line and column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location<'a> {
    pub path: &'a str,
    pub line: u32,
    /// Column in characters.
    pub column: u32,
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// Registry of source files.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and reserve its offset range.
    pub fn add_file(&mut self, path: impl Into<String>, text: impl Into<String>) -> FileId {
        // Offset 0 stays unassigned so `Span::DUMMY` never resolves.
        let base = self.files.last().map_or(1, |last| {
            last.base.saturating_add(last.len()).saturating_add(1)
        });
        let text = text.into();
        let lines = LineOffsets::build(&text);
        let id = FileId::new(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile {
            path: path.into(),
            text,
            base,
            lines,
        });
        id
    }

    /// Global offset of a 1-based line and column (in bytes) in `file`.
    ///
    /// Returns `None` when the position lies outside the file.
    pub fn position(&self, file: FileId, line: u32, column: u32) -> Option<u32> {
        let source = self.files.get(file.index())?;
        let line_start = source.lines.line_start(line)?;
        let local = line_start.checked_add(column.checked_sub(1)?)?;
        if local > source.len() {
            return None;
        }
        source.base.checked_add(local)
    }

    /// Span of one byte at a position, or [`Span::DUMMY`] when out of range.
    pub fn span_at(&self, file: FileId, line: u32, column: u32) -> Span {
        self.position(file, line, column)
            .map_or(Span::DUMMY, |start| Span::new(start, start + 1))
    }

    fn file_of(&self, offset: u32) -> Option<&SourceFile> {
        let index = self
            .files
            .partition_point(|file| file.base <= offset)
            .checked_sub(1)?;
        self.files.get(index).filter(|file| file.contains(offset))
    }

    /// Resolve a global offset to path, line and column.
    pub fn locate(&self, offset: u32) -> Option<Location<'_>> {
        let file = self.file_of(offset)?;
        let local = offset - file.base;
        let line_index = file.lines.line_index(local);
        let line_start = file.lines.offsets.get(line_index).copied().unwrap_or(0) as usize;
        let end = (local as usize).min(file.text.len());
        let column = file
            .text
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        Some(Location {
            path: &file.path,
            line: u32::try_from(line_index + 1).unwrap_or(u32::MAX),
            column: u32::try_from(column + 1).unwrap_or(u32::MAX),
        })
    }

    /// The full text of the line containing `offset`, without its newline.
    pub fn line_text(&self, offset: u32) -> Option<&str> {
        let file = self.file_of(offset)?;
        let local = offset - file.base;
        let line_index = file.lines.line_index(local);
        let start = *file.lines.offsets.get(line_index)? as usize;
        let end = file
            .lines
            .offsets
            .get(line_index + 1)
            .map_or(file.text.len(), |next| (*next as usize).saturating_sub(1));
        file.text.get(start..end)
    }

    /// Path of a registered file.
    pub fn path(&self, file: FileId) -> Option<&str> {
        self.files.get(file.index()).map(|f| f.path.as_str())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
