//! Front matter block and field location
//!
//! This module implements the two text scans the updater needs: finding the
//! delimited block at the top of a document, and finding a field line inside
//! that block. Both are plain line-oriented scans kept behind the
//! [`BlockScanner`] trait, so a stricter structural parser can replace them
//! without touching the upsert policy.

/// Span of the front matter block within a document
///
/// The block always starts at offset 0 and covers `text[..end]`, delimiter
/// lines inclusive; `end` sits directly after the closing delimiter text, so
/// the suffix keeps its leading newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub end: usize,
}

/// Byte range of a field line's content within a block
///
/// Excludes the line terminator (and a trailing `\r`), so replacing the range
/// preserves the document's line endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub start: usize,
    pub end: usize,
}

/// Locates block bounds and field lines inside a document
pub trait BlockScanner {
    /// Find the smallest front matter block starting at offset 0
    fn locate_block(&self, text: &str) -> Option<BlockSpan>;

    /// Find the first line in `block` whose key matches `field_name`
    fn find_field(&self, block: &str, field_name: &str) -> Option<FieldSpan>;

    /// Re-locate the closing delimiter line at the end of `block`
    ///
    /// Returns the byte offset where that line starts, used as the insertion
    /// point for a new field line. `None` means the caller must fall back to
    /// appending at the end of the block.
    fn find_closing_delimiter(&self, block: &str) -> Option<usize>;
}

/// Default scanner matching a literal delimiter line
#[derive(Debug, Clone)]
pub struct DelimiterScanner {
    delimiter: String,
}

/// Strip a single trailing `\r` so CRLF documents scan like LF ones.
fn line_content(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

impl DelimiterScanner {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl BlockScanner for DelimiterScanner {
    fn locate_block(&self, text: &str) -> Option<BlockSpan> {
        // The opening delimiter must occupy the whole first line.
        let first_end = text.find('\n')?;
        if line_content(&text[..first_end]) != self.delimiter {
            return None;
        }

        // Smallest span: the next line that is exactly the delimiter closes
        // the block.
        let mut pos = first_end + 1;
        while pos <= text.len() {
            let line_end = text[pos..]
                .find('\n')
                .map(|i| pos + i)
                .unwrap_or(text.len());
            if line_content(&text[pos..line_end]) == self.delimiter {
                return Some(BlockSpan {
                    end: pos + self.delimiter.len(),
                });
            }
            if line_end == text.len() {
                break;
            }
            pos = line_end + 1;
        }
        None
    }

    fn find_field(&self, block: &str, field_name: &str) -> Option<FieldSpan> {
        let mut pos = 0;
        for line in block.split_inclusive('\n') {
            let content = line_content(line.trim_end_matches('\n'));
            if content.len() > field_name.len()
                && content.starts_with(field_name)
                && content.as_bytes()[field_name.len()] == b':'
            {
                return Some(FieldSpan {
                    start: pos,
                    end: pos + content.len(),
                });
            }
            pos += line.len();
        }
        None
    }

    fn find_closing_delimiter(&self, block: &str) -> Option<usize> {
        let trimmed = block.trim_end();
        if !trimmed.ends_with(&self.delimiter) {
            return None;
        }
        let start = trimmed.len() - self.delimiter.len();
        // Must be a full line of its own, not the tail of some other line.
        if !block[..start].ends_with('\n') {
            return None;
        }
        Some(start)
    }
}
