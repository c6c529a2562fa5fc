//! Helpers for integration tests.

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use timegrid::calendar::FixedClock;
use timegrid::storage::FileStore;

/// Installs the test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Temporary storage directory used in integration tests.
pub struct TestDir {
    tempdir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        init_logging();
        let tempdir = TempDir::new().expect("Failed to create temp dir");
        TestDir { tempdir }
    }

    /// A file store rooted in the temporary directory. Multiple stores over
    /// the same directory see each other's writes.
    pub fn store(&self) -> FileStore {
        FileStore::new(self.tempdir.path())
    }
}

/// Wednesday 2026-01-07 at noon UTC; its week starts Monday 2026-01-05.
pub fn midweek_clock() -> FixedClock {
    FixedClock(midweek_noon())
}

pub fn midweek_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}
