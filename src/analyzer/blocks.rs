//! Block Boundaries
//!
//! Indentation-based extent of a `class` or `def` body.

use super::text::{indent_width, is_blank};

/// Last line (0-indexed, inclusive) of the block opened at `start`.
///
/// The block ends right before the first non-blank line indented at or
/// below `indent`; blank lines never close a block. Without such a line the
/// block runs to the end of the file.
pub fn block_end(lines: &[&str], start: usize, indent: usize) -> usize {
    if start >= lines.len() {
        return start;
    }

    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| !is_blank(line) && indent_width(line) <= indent)
        .map(|(idx, _)| idx - 1)
        .unwrap_or(lines.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<&str> {
        src.lines().collect()
    }

    #[test]
    fn test_block_ends_before_next_top_level() {
        let src = lines(
            "class A:\n    def a(self):\n        pass\n    def b(self):\n        pass\n\nclass B:\n    pass",
        );
        assert_eq!(block_end(&src, 0, 0), 5);
    }

    #[test]
    fn test_blank_lines_do_not_terminate() {
        let src = lines("def f():\n    x = 1\n\n\n    return x\ny = 2");
        assert_eq!(block_end(&src, 0, 0), 4);
    }

    #[test]
    fn test_block_runs_to_eof() {
        let src = lines("class A:\n    x = 1\n\n");
        assert_eq!(block_end(&src, 0, 0), src.len() - 1);
    }

    #[test]
    fn test_nested_indent() {
        let src = lines("class A:\n    def a(self):\n        pass\n    def b(self):\n        pass");
        assert_eq!(block_end(&src, 1, 4), 2);
        assert_eq!(block_end(&src, 3, 4), 4);
    }

    #[test]
    fn test_header_on_last_line() {
        let src = lines("x = 1\nclass A:");
        assert_eq!(block_end(&src, 1, 0), 1);
    }

    #[test]
    fn test_tabs_count_as_four() {
        let src = lines("class A:\n\tdef a(self):\n\t\tpass\n    def b(self):\n\t\tpass");
        assert_eq!(block_end(&src, 1, 4), 2);
    }
}
