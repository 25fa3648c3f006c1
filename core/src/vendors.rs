use std::sync::OnceLock;

use mac_oui::Oui;
use machunt_common::network::HardwareAddress;
use machunt_common::vendors::VendorRepository;
use tracing::debug;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Loads the bundled OUI database once. A database that fails to load
/// simply disables vendor lookups.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                debug!("OUI database unavailable: {e}");
                None
            }
        })
        .as_ref()
}

pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, addr: HardwareAddress) -> Option<String> {
        let db = get_oui_db()?;
        match db.lookup_by_mac(&addr.mac().to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}
