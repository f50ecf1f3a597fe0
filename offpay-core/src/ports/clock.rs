//! Clock port - wall-clock abstraction
//!
//! Lockout and session expiry are wall-clock based and re-evaluated on each
//! check rather than scheduled. Injecting the clock keeps those checks
//! deterministic in tests without real sleeps.

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
