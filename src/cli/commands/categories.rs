//! List record categories.

use anyhow::Result;
use fincache_core::CacheCategory;

pub async fn run() -> Result<()> {
    println!("Record Categories");
    println!("═══════════════════════════════════════");
    println!();

    for category in CacheCategory::ALL {
        println!("  {:<20} key field: {}", category, category.key_field());
    }

    Ok(())
}
