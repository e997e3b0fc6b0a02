//! Line Index
//!
//! Splits source into lines once and resolves byte offsets to line numbers
//! through precomputed line-start offsets.

use crate::constants::analysis::TAB_WIDTH;

/// Line table for one source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    lines: Vec<&'a str>,
    /// Byte offset where each line starts; sorted ascending
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut starts = Vec::new();
        let mut offset = 0usize;

        for raw in content.split_inclusive('\n') {
            starts.push(offset);
            offset += raw.len();
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            lines.push(line.strip_suffix('\r').unwrap_or(line));
        }

        Self { lines, starts }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 1-indexed line containing `offset`. Offsets past the end map to the
    /// last line.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx.max(1),
        }
    }
}

/// Indentation width of a line: spaces count 1, tabs count [`TAB_WIDTH`].
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

#[inline]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
