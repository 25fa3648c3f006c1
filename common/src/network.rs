pub mod address;
pub mod records;

pub use address::{AddressError, HardwareAddress};
pub use records::{DeviceIdentity, InterfaceRecord, NeighborRecord};
