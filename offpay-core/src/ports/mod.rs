//! Port definitions - traits for external dependencies

pub mod clock;
pub mod device;
pub mod store;

pub use clock::Clock;
pub use device::DeviceIdentity;
pub use store::Store;
