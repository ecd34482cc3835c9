use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rating::Rating;

/// One catalog entry. Identity is `id` alone: `==` and `Hash` look only at the id, so two
/// values with the same id are the same webtoon even when their ratings differ. Use
/// [`Webtoon::same_values`] to compare every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webtoon {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[serde(rename = "audioURL")]
    pub audio_url: String,
    pub description: String,
    pub rating: Rating,
}

impl Webtoon {
    /// Build an entry with a fresh random id.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        audio_url: impl Into<String>,
        description: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            category: category.into(),
            audio_url: audio_url.into(),
            description: description.into(),
            rating,
        }
    }

    /// Field-by-field comparison, including the rating.
    pub fn same_values(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.category == other.category
            && self.audio_url == other.audio_url
            && self.description == other.description
            && self.rating == other.rating
    }
}

impl PartialEq for Webtoon {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for Webtoon {}

impl Hash for Webtoon {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

/// Both lists hold the same webtoons in the same order with identical fields.
#[cfg(test)]
pub(crate) fn assert_same_values(left: &[Webtoon], right: &[Webtoon]) {
    assert_eq!(left.len(), right.len(), "length differs: {left:?} vs {right:?}");
    for (l, r) in left.iter().zip(right) {
        assert!(l.same_values(r), "{l:?} != {r:?}");
    }
}

/// Change notifications published by [`crate::library::Library`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    FavoriteAdded(Uuid),
    FavoriteRemoved(Uuid),
    RatingChanged { id: Uuid, rating: Rating },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_id_is_same_webtoon_whatever_the_rating() {
        let a = crate::catalog::load_catalog()[0].clone();
        let mut b = a.clone();
        b.rating = Rating::stars(1).unwrap();
        assert_eq!(a, b);
        assert!(!a.same_values(&b));

        let set: HashSet<Webtoon> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&a));
    }

    #[test]
    fn different_ids_differ_even_with_equal_fields() {
        let a = Webtoon::new("Pigpen", "Thriller", "u", "d", Rating::UNRATED);
        let b = Webtoon::new("Pigpen", "Thriller", "u", "d", Rating::UNRATED);
        assert_ne!(a, b);
        assert!(!a.same_values(&b));
    }

    #[test]
    fn json_uses_audio_url_field_name() {
        let w = Webtoon::new("Pigpen", "Thriller", "https://example.com/a.mp3", "Island.", Rating::stars(4).unwrap());
        let v: serde_json::Value = serde_json::to_value(&w).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["audioURL", "category", "description", "id", "rating", "title"]);
        assert_eq!(obj["rating"], 4);
        assert_eq!(obj["id"], w.id.to_string());
    }
}
