//! Amenity classification for project listings.
//!
//! Maps a free-text amenity name to the icon the front-end renders.
//! The match is an ordered, case-insensitive substring scan; the first
//! category with a matching keyword wins. Because `park` is listed
//! under landscaping ahead of the vehicle keywords, "Covered Parking"
//! classifies as `TreePine` rather than `Car`. That quirk is part of
//! the published listing data and is kept as-is.

use serde::{Deserialize, Serialize};

/// Icon used when no keyword matches.
pub const DEFAULT_ICON: &str = "Building2";

/// Ordered keyword table: the first category whose keyword occurs in
/// the lowercased amenity name decides the icon.
const ICON_RULES: &[(&[&str], &str)] = &[
    (&["pool", "swim"], "Waves"),
    (&["gym", "fitness"], "Dumbbell"),
    (&["park", "garden", "green"], "TreePine"),
    (&["parking", "car", "garage", "valet"], "Car"),
    (&["security", "cctv", "gated"], "ShieldCheck"),
    (&["school", "nursery"], "GraduationCap"),
    (&["retail", "shop", "mall"], "ShoppingBag"),
    (&["restaurant", "cafe", "dining"], "Utensils"),
    (&["beach", "marina", "sea"], "Sailboat"),
    (&["spa", "sauna", "wellness"], "Sparkles"),
];

/// An amenity with its resolved icon, as stored on the project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub name: String,
    pub icon: String,
}

impl Amenity {
    /// Classify a free-text amenity name.
    pub fn classify(name: &str) -> Self {
        Amenity {
            name: name.to_string(),
            icon: amenity_icon(name).to_string(),
        }
    }
}

/// Resolve the icon for an amenity name.
pub fn amenity_icon(name: &str) -> &'static str {
    let lowered = name.to_lowercase();
    for (keywords, icon) in ICON_RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return icon;
        }
    }
    DEFAULT_ICON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        assert_eq!(amenity_icon("Swimming Pool"), "Waves");
        assert_eq!(amenity_icon("SWIMMING POOL"), "Waves");
        assert_eq!(amenity_icon("Fully Equipped Gym"), "Dumbbell");
    }

    #[test]
    fn covered_parking_hits_the_park_keyword_first() {
        // "park" is a substring of "parking" and its category is listed
        // first, so parking amenities classify as landscaping.
        assert_eq!(amenity_icon("Covered Parking"), "TreePine");
        assert_eq!(amenity_icon("Car Park"), "TreePine");
    }

    #[test]
    fn vehicle_keywords_still_reachable() {
        assert_eq!(amenity_icon("Private Garage"), "Car");
        assert_eq!(amenity_icon("Valet Service"), "Car");
    }

    #[test]
    fn first_category_wins_on_multiple_matches() {
        // Both "pool" and "garden" occur; "pool" is listed first.
        assert_eq!(amenity_icon("Pool Garden Deck"), "Waves");
    }

    #[test]
    fn unknown_amenity_falls_back_to_default() {
        assert_eq!(amenity_icon("Concierge"), DEFAULT_ICON);
        assert_eq!(amenity_icon(""), DEFAULT_ICON);
    }

    #[test]
    fn classify_keeps_the_original_name() {
        let amenity = Amenity::classify("Kids Play Area & Garden");
        assert_eq!(amenity.name, "Kids Play Area & Garden");
        assert_eq!(amenity.icon, "TreePine");
    }
}
