mod memory;
pub mod seed;

pub use memory::{Store, Table};

use std::sync::Arc;

use crate::{config::AppConfig, error::Result};

/// Build the shared store, seeding the demo catalog when configured.
pub fn create_store(config: &AppConfig) -> Result<Arc<Store>> {
    let store = Arc::new(Store::new());

    if config.seed_demo {
        seed::seed_demo_data(&store)?;
        tracing::info!(
            "Seeded demo catalog: {} categories, {} products, {} images",
            store.categories.len(),
            store.products.len(),
            store.product_images.len()
        );
    }

    Ok(store)
}
