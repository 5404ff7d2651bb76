//! Activity log for poolwizard
//!
//! Every settled user action (transaction or ad-hoc check) is appended to an
//! append-only log so a debugging session can be replayed afterwards.
//!
//! - `ActivityEntry`: one settled outcome with timestamp, operation, status,
//!   message and, for failures, the serialized error payload.
//! - `ActivityLogger`: line-delimited JSON (JSONL) writer and reader.

mod entry;
mod logger;

pub use entry::ActivityEntry;
pub use logger::ActivityLogger;
