//! Field upsert policy
//!
//! Given a front matter block, rewrite it so the timestamp field carries the
//! new value: replace the first matching field line if one exists, otherwise
//! insert a new line immediately before the closing delimiter. The policy is
//! deliberately line-based and leaves every other byte of the block alone.

use crate::core::scan::BlockScanner;

/// Result of applying the upsert policy to a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The block with the field updated or inserted
    Applied { block: String },
    /// The field is absent and auto-insert is disabled
    MissingNoInsert,
}

/// Upsert `field_name: value` into `block`
///
/// When the block contains several lines matching the field, only the first
/// is replaced; later duplicates are left as they are. When the closing
/// delimiter cannot be re-located at the end of the block, the new field line
/// is appended after the block instead (degenerate fallback).
pub fn upsert_field(
    scanner: &dyn BlockScanner,
    block: &str,
    field_name: &str,
    value: &str,
    auto_insert: bool,
) -> UpsertOutcome {
    let field_line = format!("{field_name}: {value}");

    if let Some(span) = scanner.find_field(block, field_name) {
        let mut updated = String::with_capacity(block.len() + field_line.len());
        updated.push_str(&block[..span.start]);
        updated.push_str(&field_line);
        updated.push_str(&block[span.end..]);
        return UpsertOutcome::Applied { block: updated };
    }

    if !auto_insert {
        return UpsertOutcome::MissingNoInsert;
    }

    let updated = match scanner.find_closing_delimiter(block) {
        Some(closing) => {
            let mut updated = String::with_capacity(block.len() + field_line.len() + 1);
            updated.push_str(&block[..closing]);
            updated.push_str(&field_line);
            updated.push('\n');
            updated.push_str(&block[closing..]);
            updated
        }
        None => format!("{block}\n{field_line}\n"),
    };
    UpsertOutcome::Applied { block: updated }
}
