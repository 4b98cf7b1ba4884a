use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time. The daily scan asks it what "today" is, so
/// tests can move the clock without waiting for midnight.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that stands still until it is told otherwise
pub struct FixedSys {
    timestamp_millis: AtomicI64,
}

impl FixedSys {
    pub fn new(timestamp_millis: i64) -> Self {
        Self {
            timestamp_millis: AtomicI64::new(timestamp_millis),
        }
    }

    pub fn set_timestamp_millis(&self, timestamp_millis: i64) {
        self.timestamp_millis.store(timestamp_millis, Ordering::SeqCst);
    }
}

impl ISys for FixedSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis.load(Ordering::SeqCst)
    }
}
