use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::SettingsStore;
use crate::types::Webtoon;

/// Settings key the favorites list is stored under.
pub const FAVORITES_KEY: &str = "FavoriteWebtoons";

/// Outcome of [`Favorites::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Read the persisted favorites. Missing, unreadable or undecodable data all yield an empty
/// list; nothing is reported to the caller.
pub async fn load_favorites(store: &dyn SettingsStore) -> Vec<Webtoon> {
    let payload = match store.get_setting(FAVORITES_KEY).await {
        Ok(Some(p)) => p,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "could not read favorites; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Webtoon>>(&payload) {
        Ok(items) => {
            debug!(count = items.len(), "favorites loaded");
            items
        }
        Err(e) => {
            warn!(error = %e, "discarding undecodable favorites");
            Vec::new()
        }
    }
}

/// Overwrite the persisted favorites with `favorites`. Failures skip the write.
pub async fn save_favorites(store: &dyn SettingsStore, favorites: &[Webtoon]) {
    let payload = match serde_json::to_string(favorites) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "could not encode favorites; write skipped");
            return;
        }
    };
    if let Err(e) = store.put_setting(FAVORITES_KEY, &payload).await {
        warn!(error = %e, "could not persist favorites");
    }
}

/// The user's favorites: value copies of catalog entries, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    items: Vec<Webtoon>,
}

impl Favorites {
    pub fn new(items: Vec<Webtoon>) -> Self { Self { items } }

    pub fn items(&self) -> &[Webtoon] { &self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.iter().any(|w| w.id == id)
    }

    /// Remove every entry sharing `webtoon.id`, or append a copy when there is none.
    pub fn toggle(&mut self, webtoon: &Webtoon) -> Toggle {
        if self.contains(webtoon.id) {
            self.items.retain(|w| w.id != webtoon.id);
            Toggle::Removed
        } else {
            self.items.push(webtoon.clone());
            Toggle::Added
        }
    }
}
