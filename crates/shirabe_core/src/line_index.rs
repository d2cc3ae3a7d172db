//! Position index over one document.
//!
//! Built once per lint pass in a single linear scan, then queried to map
//! between absolute byte offsets and 0-based line/column pairs. Purely a
//! read-only structure over the original document; discarded after
//! normalization.

use shirabe_diagnostic::Position;

use crate::error::PositionError;

/// Bidirectional offset <-> line/column mapping for a single document.
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset at which each line begins, ascending. Always contains
    /// at least the offset 0.
    line_starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    /// Builds the index by scanning for line terminators.
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0u32];
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx as u32 + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Returns the indexed document.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the document length in bytes.
    pub fn len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Returns true if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the number of recorded lines.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Returns the byte offset at which the given 0-indexed line begins.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Returns the last valid offset on the given 0-indexed line: the
    /// offset of its newline, or the document length for the final line.
    pub fn line_end(&self, line: u32) -> Option<u32> {
        if (line as usize) >= self.line_starts.len() {
            return None;
        }
        match self.line_starts.get(line as usize + 1) {
            Some(next_start) => Some(next_start - 1),
            None => Some(self.len()),
        }
    }

    /// Converts an absolute byte offset to a 0-based line/column pair.
    ///
    /// Uses binary search over the recorded line starts for O(log n)
    /// lookup. Fails with [`PositionError::OutOfRange`] if the offset
    /// exceeds the document length; `offset == len` is valid and names
    /// the end of the document.
    pub fn offset_to_position(&self, offset: u32) -> Result<Position, PositionError> {
        if offset > self.len() {
            return Err(PositionError::OutOfRange {
                offset,
                len: self.len(),
            });
        }
        Ok(self.position_at(offset))
    }

    /// Infallible variant of [`offset_to_position`](Self::offset_to_position):
    /// clamps the offset to the document length first.
    pub fn position_at(&self, offset: u32) -> Position {
        let offset = offset.min(self.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Position::new(line as u32, offset - self.line_starts[line])
    }

    /// Converts a 0-based line/column pair back to an absolute byte offset.
    ///
    /// Fails with [`PositionError::InvalidPosition`] if the line exceeds
    /// the number of recorded lines or the column runs past the end of
    /// that line.
    pub fn position_to_offset(&self, position: Position) -> Result<u32, PositionError> {
        let invalid = PositionError::InvalidPosition {
            line: position.line,
            column: position.column,
        };
        let start = self.line_start(position.line).ok_or(invalid)?;
        let offset = start + position.column;
        // line_end is Some whenever line_start is.
        if self.line_end(position.line).is_some_and(|end| offset <= end) {
            Ok(offset)
        } else {
            Err(invalid)
        }
    }
}
