use std::path::Path;

use anyhow::Context;
use machunt_common::{config::Config, inventory::Inventory};

use crate::mprint;
use crate::terminal::{format, print};

pub fn inventory(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let inventory = Inventory::load(path)
        .with_context(|| format!("loading inventory from {}", path.display()))?;

    print::header("inventory", cfg.quiet);
    for (idx, device) in inventory.devices().iter().enumerate() {
        print::tree_head(idx, &device.name);
        if cfg.quiet < 2 {
            print::as_tree_one_level(format::device_to_details(device));
        }
        if idx + 1 != inventory.len() {
            mprint!();
        }
    }

    print::fat_separator();
    print::print_status(format!("{} devices loaded from {}", inventory.len(), path.display()));
    Ok(())
}
