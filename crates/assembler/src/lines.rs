//! Line counting for rendered file headers.
//!
//! A line is a run of text terminated by `\n` (or `\r\n`), or the
//! unterminated tail of the content. A trailing newline does not start a
//! new line, and empty content has zero lines. A bare `\r` is ordinary
//! text, not a terminator.

use ctxpack_core::FileRecord;

/// Count the lines in a file's content.
pub fn line_count(content: &str) -> usize {
    content.lines().count()
}

/// Sum of line counts across files.
pub fn total_lines(files: &[FileRecord]) -> usize {
    files.iter().map(|f| line_count(&f.content)).sum()
}
