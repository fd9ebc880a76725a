pub mod scan;
pub mod stamp;
pub mod updater;
pub mod upsert;

pub use scan::{BlockScanner, BlockSpan, DelimiterScanner, FieldSpan};
pub use stamp::{format_timestamp, Clock, SystemClock};
pub use updater::{DocumentStore, InFlightGuard, Outcome, Rewrite, Updater};
pub use upsert::{upsert_field, UpsertOutcome};
