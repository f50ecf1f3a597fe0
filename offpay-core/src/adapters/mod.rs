//! Adapter implementations of the ports

pub mod json_file;
pub mod memory;
pub mod system;

pub use json_file::JsonFileStore;
pub use memory::{FixedDeviceIdentity, ManualClock, MemoryStore};
pub use system::{FileDeviceIdentity, SystemClock};
