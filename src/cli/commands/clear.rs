//! Clear cache command.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::disk_cache;

pub async fn run(config_path: &Path) -> Result<()> {
    let cache = disk_cache(config_path)?;
    let removed = cache
        .clear_all()
        .with_context(|| format!("Failed to clear cache at {:?}", cache.dir()))?;

    info!("Cleared {} entries from {:?}", removed, cache.dir());
    println!("Removed {} cache entries", removed);
    Ok(())
}
