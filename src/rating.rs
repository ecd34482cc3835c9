use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// A 0..=5 score; 0 means the item has not been rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const UNRATED: Rating = Rating(0);
    pub const MAX: u8 = 5;

    /// A user-given score. Only 1..=5 are accepted; 0 is reserved for "unrated".
    pub fn stars(value: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 { self.0 }

    pub fn is_rated(self) -> bool { self.0 > 0 }
}

impl TryFrom<u8> for Rating {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> anyhow::Result<Self> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(anyhow!("rating {} is outside 0..={}", value, Self::MAX))
        }
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 { r.0 }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_accepts_one_through_five_only() {
        assert_eq!(Rating::stars(0), None);
        assert_eq!(Rating::stars(6), None);
        for n in 1..=5 {
            assert_eq!(Rating::stars(n).map(Rating::get), Some(n));
        }
    }

    #[test]
    fn decoding_rejects_values_above_five() {
        assert_eq!(serde_json::from_str::<Rating>("0").unwrap(), Rating::UNRATED);
        assert_eq!(serde_json::from_str::<Rating>("5").unwrap().get(), 5);
        assert!(serde_json::from_str::<Rating>("6").is_err());
        assert!(serde_json::from_str::<Rating>("-1").is_err());
    }

    #[test]
    fn try_from_reports_the_offending_value() {
        assert_eq!(Rating::try_from(5u8).unwrap().get(), 5);
        let err = Rating::try_from(7u8).unwrap_err();
        assert_eq!(err.to_string(), "rating 7 is outside 0..=5");
        let json_err = serde_json::from_str::<Rating>("7").unwrap_err();
        assert!(json_err.to_string().contains("rating 7 is outside 0..=5"), "{json_err}");
    }

    #[test]
    fn encodes_as_bare_integer() {
        let r = Rating::stars(3).unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), "3");
    }
}
