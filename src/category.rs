use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a category's loader substitutes when an endpoint cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Deterministic synthetic records, visibly marked as samples.
    Placeholder,
    /// An empty collection; the grid shows its "no items" tile.
    Empty,
}

/// The six fixed product groupings of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ktruck,
    Kotatsu,
    Anime,
    Jstore,
    Gaijin,
    Wsskate,
}

/// Static per-category wiring: endpoints, containers, copy and fallback policy.
#[derive(Debug)]
pub struct CategoryInfo {
    pub slug: &'static str,
    pub media_resource: &'static str,
    pub description_resource: &'static str,
    pub grid_id: &'static str,
    pub modal_id: &'static str,
    pub section_title: &'static str,
    pub section_blurb: &'static str,
    pub placeholder_fields: &'static [&'static str],
    pub fallback: Fallback,
}

const KTRUCK: CategoryInfo = CategoryInfo {
    slug: "ktruck",
    media_resource: "ktruckimage.json",
    description_resource: "ktruckdescription.json",
    grid_id: "ktrucks-grid",
    modal_id: "ktruck-modal",
    section_title: "K Trucks",
    section_blurb: "Browse our selection of compact Japanese Kei trucks, perfect for urban deliveries and small businesses. Features include excellent fuel economy and easy maneuverability.",
    placeholder_fields: &[],
    fallback: Fallback::Empty,
};

const KOTATSU: CategoryInfo = CategoryInfo {
    slug: "kotatsu",
    media_resource: "kotatsu.json",
    description_resource: "kotatsudescription.json",
    grid_id: "kotatsu-grid",
    modal_id: "kotatsu-modal",
    section_title: "Kotatsu",
    section_blurb: "Authentic Japanese Kotatsu tables, combining comfort and functionality. Perfect for keeping warm during winter while enjoying meals or relaxing.",
    placeholder_fields: &["size", "material", "heater", "style", "price"],
    fallback: Fallback::Placeholder,
};

const ANIME: CategoryInfo = CategoryInfo {
    slug: "anime",
    media_resource: "anime.json",
    description_resource: "animedescription.json",
    grid_id: "anime-grid",
    modal_id: "anime-modal",
    section_title: "Anime",
    section_blurb: "Explore our collection of Japanese animation, movies, music, and other media. Direct imports from Japan with original packaging.",
    placeholder_fields: &["title", "genre", "episodes", "year", "price"],
    fallback: Fallback::Placeholder,
};

const JSTORE: CategoryInfo = CategoryInfo {
    slug: "jstore",
    media_resource: "jstore.json",
    description_resource: "jstoredescription.json",
    grid_id: "jstore-grid",
    modal_id: "jstore-modal",
    section_title: "Japanese Store",
    section_blurb: "Discover unique Japanese clothing styles and household items. From traditional wear to modern Japanese home goods.",
    placeholder_fields: &["category", "origin", "material", "size", "price"],
    fallback: Fallback::Placeholder,
};

const GAIJIN: CategoryInfo = CategoryInfo {
    slug: "gaijin",
    media_resource: "gaijin.json",
    description_resource: "gaijindescription.json",
    grid_id: "gaijin-grid",
    modal_id: "gaijin-modal",
    section_title: "Gaijin Haiku",
    section_blurb: "",
    placeholder_fields: &["title", "author", "style", "year", "price"],
    fallback: Fallback::Placeholder,
};

const WSSKATE: CategoryInfo = CategoryInfo {
    slug: "wsskate",
    media_resource: "wsskate.json",
    description_resource: "wsskatedescription.json",
    grid_id: "wsskate-grid",
    modal_id: "wsskate-modal",
    section_title: "WS SKATE Scene",
    section_blurb: "Video Library",
    placeholder_fields: &["title", "length", "format", "year", "price"],
    fallback: Fallback::Placeholder,
};

impl Category {
    /// Display order of the storefront sections.
    pub const ALL: [Category; 6] = [
        Category::Ktruck,
        Category::Kotatsu,
        Category::Anime,
        Category::Jstore,
        Category::Gaijin,
        Category::Wsskate,
    ];

    pub fn info(self) -> &'static CategoryInfo {
        match self {
            Category::Ktruck => &KTRUCK,
            Category::Kotatsu => &KOTATSU,
            Category::Anime => &ANIME,
            Category::Jstore => &JSTORE,
            Category::Gaijin => &GAIJIN,
            Category::Wsskate => &WSSKATE,
        }
    }

    pub fn slug(self) -> &'static str { self.info().slug }

    /// Slug with its first letter upper-cased, as used in synthetic labels.
    pub fn label(self) -> String {
        let slug = self.slug();
        let mut chars = slug.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.slug()) }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == norm)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
