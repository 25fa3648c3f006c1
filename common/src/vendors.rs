use crate::network::HardwareAddress;

/// Defines the contract for resolving device manufacturers from hardware addresses.
pub trait VendorRepository: Send + Sync {
    /// Retrieves the vendor name for a given address.
    ///
    /// Returns `None` if the OUI is unknown.
    fn get_vendor(&self, addr: HardwareAddress) -> Option<String>;
}
