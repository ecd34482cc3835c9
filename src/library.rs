use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::favorites::{load_favorites, save_favorites, Favorites, Toggle};
use crate::rating::Rating;
use crate::storage::SettingsStore;
use crate::types::{LibraryEvent, Webtoon};

const EVENT_CAPACITY: usize = 64;

/// Owns the catalog and the favorites and is the single place either is mutated.
///
/// Consumers receive it by reference and observe changes through [`Library::subscribe`].
pub struct Library {
    catalog: Catalog,
    favorites: Favorites,
    store: Arc<dyn SettingsStore>,
    events: broadcast::Sender<LibraryEvent>,
}

impl Library {
    /// Build the catalog and load persisted favorites from `store`.
    pub async fn open(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_catalog(Catalog::load(), store).await
    }

    pub async fn with_catalog(catalog: Catalog, store: Arc<dyn SettingsStore>) -> Self {
        let favorites = Favorites::new(load_favorites(store.as_ref()).await);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        info!(webtoons = catalog.len(), favorites = favorites.len(), "library opened");
        Self { catalog, favorites, store, events }
    }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn webtoons(&self) -> &[Webtoon] { self.catalog.items() }

    pub fn favorites(&self) -> &[Webtoon] { self.favorites.items() }

    pub fn categories(&self) -> Vec<&str> { self.catalog.categories() }

    pub fn is_favorite(&self, id: Uuid) -> bool { self.favorites.contains(id) }

    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> { self.events.subscribe() }

    /// Add or remove `webtoon` from the favorites, then persist the whole list. The write has
    /// completed when this returns; write failures are logged only.
    pub async fn toggle_favorite(&mut self, webtoon: &Webtoon) -> Toggle {
        let outcome = self.favorites.toggle(webtoon);
        save_favorites(self.store.as_ref(), self.favorites.items()).await;
        let event = match outcome {
            Toggle::Added => LibraryEvent::FavoriteAdded(webtoon.id),
            Toggle::Removed => LibraryEvent::FavoriteRemoved(webtoon.id),
        };
        // No receivers is fine
        let _ = self.events.send(event);
        outcome
    }

    /// Set the catalog rating of `webtoon`. The favorites copy keeps its old rating.
    pub fn update_rating(&mut self, webtoon: &Webtoon, stars: u8) -> Option<Rating> {
        let rating = self.catalog.update_rating(webtoon.id, stars)?;
        let _ = self.events.send(LibraryEvent::RatingChanged { id: webtoon.id, rating });
        Some(rating)
    }
}
