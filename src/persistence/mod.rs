//! Best-run persistence
//!
//! Features:
//! - Two-value record (best level, best score)
//! - JSON file under the platform data directory
//! - Missing or corrupt files fall back to the default record

pub mod record;

pub use record::{
    FileRecordStore, MemoryRecordStore, Record, RecordError, RecordStore, SessionOutcome,
    finish_session,
};
