pub mod catalog;
pub mod config;
pub mod db;
pub mod favorites;
pub mod library;
pub mod playback;
pub mod rating;
pub mod storage;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::{load_catalog, Catalog};
    pub use crate::config::Config;
    pub use crate::favorites::{load_favorites, save_favorites, Favorites, Toggle, FAVORITES_KEY};
    pub use crate::library::Library;
    pub use crate::playback::{AudioBackend, AudioControl, PlaybackState, TracingBackend};
    pub use crate::rating::Rating;
    pub use crate::storage::{MemoryStore, SettingsStore};
    pub use crate::types::{LibraryEvent, Webtoon};
}

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::db::Database;
use crate::library::Library;
use crate::storage::{MemoryStore, SettingsStore};

/// Pick the settings store described by `config` and open the library on it.
pub async fn open_library(config: &Config) -> Result<Library> {
    let store: Arc<dyn SettingsStore> = if config.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(Database::open(config.database_url.as_deref()).await?)
    };
    Ok(Library::open(store).await)
}
