//! Device identity port
//!
//! How a device identifier is acquired is a host concern; the core only
//! needs a stable value to bind sessions to.

use crate::domain::result::Result;

/// Stable identifier of the device this process runs on
pub trait DeviceIdentity: Send + Sync {
    fn device_id(&self) -> Result<String>;
}
