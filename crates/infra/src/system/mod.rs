use chrono::Utc;

// Mocking out time so that it is possible to run tests that depend on time.
// Batch use cases read the clock exactly once per run through this trait.
pub trait ISys: Send + Sync {
    /// The current unix timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// Real clock, used outside of tests
#[derive(Debug, Default)]
pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
