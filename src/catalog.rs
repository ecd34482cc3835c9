use tracing::{debug, warn};
use uuid::Uuid;

use crate::rating::Rating;
use crate::types::Webtoon;

const SAMPLE_AUDIO_BASE: &str = "https://www.soundhelix.com/examples/mp3";

// Namespace for catalog ids; ids are derived from category + title so they are stable
// across runs and persisted favorites keep matching their catalog entries.
const CATALOG_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b7e_8d4a_4c55_9a3e_1f0b_7c2d_5e91);

struct Seed {
    title: &'static str,
    category: &'static str,
    description: &'static str,
    rating: u8,
}

const SEEDS: [Seed; 11] = [
    Seed { title: "Lore Olympus", category: "Romance", description: "A modern retelling of the myth of Hades and Persephone.", rating: 5 },
    Seed { title: "True Beauty", category: "Romance", description: "A young woman becomes a social media star thanks to her makeup skills.", rating: 4 },
    Seed { title: "Tower of God", category: "Action", description: "Follow Bam as he climbs the mysterious Tower of God.", rating: 5 },
    Seed { title: "The God of High School", category: "Action", description: "The top fighters from across Korea compete in an epic martial arts tournament.", rating: 4 },
    Seed { title: "Solo Leveling", category: "Action", description: "Jinwoo Sung goes from being the weakest hunter to the strongest.", rating: 5 },
    Seed { title: "Sweet Home", category: "Horror", description: "A psychological thriller set in a monster-infested world.", rating: 5 },
    Seed { title: "Bastard", category: "Horror", description: "A psychological thriller about a boy with a deadly secret.", rating: 4 },
    Seed { title: "Unordinary", category: "Drama", description: "A high school where students possess extraordinary powers.", rating: 4 },
    Seed { title: "Let's Play", category: "Drama", description: "Sam, a game developer, navigates her social and work life.", rating: 4 },
    Seed { title: "Bastard", category: "Thriller", description: "A boy with a murderous father, living in constant fear.", rating: 5 },
    Seed { title: "Pigpen", category: "Thriller", description: "A psychological horror about a man trapped on an island.", rating: 4 },
];

/// The built-in catalog, in display order.
pub fn load_catalog() -> Vec<Webtoon> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, s)| Webtoon {
            id: catalog_id(s.category, s.title),
            title: s.title.to_string(),
            category: s.category.to_string(),
            audio_url: format!("{}/SoundHelix-Song-{}.mp3", SAMPLE_AUDIO_BASE, i + 1),
            description: s.description.to_string(),
            rating: Rating::try_from(s.rating).unwrap_or_default(),
        })
        .collect()
}

fn catalog_id(category: &str, title: &str) -> Uuid {
    Uuid::new_v5(&CATALOG_NAMESPACE, format!("{}/{}", category, title).as_bytes())
}

/// Fixed-membership list of webtoons. Only ratings change after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Webtoon>,
}

impl Catalog {
    pub fn load() -> Self { Self { items: load_catalog() } }

    pub fn from_items(items: Vec<Webtoon>) -> Self { Self { items } }

    pub fn items(&self) -> &[Webtoon] { &self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn get(&self, id: Uuid) -> Option<&Webtoon> {
        self.items.iter().find(|w| w.id == id)
    }

    /// Distinct category names in the order they first appear in the catalog.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for w in &self.items {
            if !out.contains(&w.category.as_str()) {
                out.push(&w.category);
            }
        }
        out
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Webtoon> + 'a {
        self.items.iter().filter(move |w| w.category == category)
    }

    /// Accepts a 1-based catalog position or a full id.
    pub fn resolve(&self, selector: &str) -> Option<&Webtoon> {
        let selector = selector.trim();
        if let Ok(pos) = selector.parse::<usize>() {
            return pos.checked_sub(1).and_then(|i| self.items.get(i));
        }
        Uuid::parse_str(selector).ok().and_then(|id| self.get(id))
    }

    /// Overwrite the rating of the entry with `id`. Scores outside 1..=5 and unknown ids leave
    /// the catalog untouched. Returns the new rating when something changed.
    pub fn update_rating(&mut self, id: Uuid, stars: u8) -> Option<Rating> {
        let Some(rating) = Rating::stars(stars) else {
            warn!(%id, stars, "ignoring out-of-range rating");
            return None;
        };
        match self.items.iter_mut().find(|w| w.id == id) {
            Some(w) => {
                w.rating = rating;
                Some(rating)
            }
            None => {
                debug!(%id, "rating update for unknown webtoon");
                None
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self { Self::load() }
}
