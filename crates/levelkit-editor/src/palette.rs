//! Asset palette: the catalog of placeable game objects.
//!
//! Each entry is a `{ name, img }` pair; the embedding UI serializes an
//! entry as the drag payload and the editor instantiates a scene object
//! from it on drop. The stock catalog mirrors the builder's sidebar;
//! hosts can extend it or replace it entirely.

use serde::{Deserialize, Serialize};

use levelkit_core::constants::PLACEHOLDER_ASSET;
use levelkit_core::ImportError;

/// One placeable object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Display name; becomes the scene object's kind.
    pub name: String,
    /// Asset path for the object's bitmap.
    pub img: String,
}

impl PaletteEntry {
    /// Creates an entry for the given name and asset path.
    pub fn new(name: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            img: img.into(),
        }
    }
}

/// A named group of palette entries.
#[derive(Debug, Clone)]
pub struct PaletteCategory {
    pub name: String,
    pub entries: Vec<PaletteEntry>,
}

/// The palette catalog: ordered categories of entries.
#[derive(Debug, Clone, Default)]
pub struct PaletteCatalog {
    categories: Vec<PaletteCategory>,
}

/// Stock catalog data: (category, [(entry name, asset path)]).
const STOCK_CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "Players & Characters",
        &[
            ("Main Player", "assets/player.png"),
            ("Enemy (Patrolling)", "assets/enemy.png"),
            ("Flying Enemy", "assets/enemy_flying.png"),
            ("NPC", "assets/npc.png"),
            ("Boss Character", "assets/boss.png"),
        ],
    ),
    (
        "Terrain & Structures",
        &[
            ("Ground", PLACEHOLDER_ASSET),
            ("Platforms", PLACEHOLDER_ASSET),
            ("Walls", PLACEHOLDER_ASSET),
            ("Ladders", PLACEHOLDER_ASSET),
            ("Moving Platform", PLACEHOLDER_ASSET),
            ("Breakable Platform", PLACEHOLDER_ASSET),
            ("Slope", PLACEHOLDER_ASSET),
        ],
    ),
    (
        "Hazards",
        &[
            ("Spikes", PLACEHOLDER_ASSET),
            ("Lava", PLACEHOLDER_ASSET),
            ("Fire Trap", PLACEHOLDER_ASSET),
            ("Falling Rock", PLACEHOLDER_ASSET),
            ("Spinning Blade", PLACEHOLDER_ASSET),
            ("Auto Turret", PLACEHOLDER_ASSET),
        ],
    ),
    (
        "Items & Collectibles",
        &[
            ("Coins", PLACEHOLDER_ASSET),
            ("Power-Ups", PLACEHOLDER_ASSET),
            ("Health Packs", PLACEHOLDER_ASSET),
            ("Keys", PLACEHOLDER_ASSET),
            ("Treasure Chest", PLACEHOLDER_ASSET),
            ("Extra Life", PLACEHOLDER_ASSET),
        ],
    ),
    (
        "Interactive Objects",
        &[
            ("Doors", PLACEHOLDER_ASSET),
            ("Switches", PLACEHOLDER_ASSET),
            ("Teleporters", PLACEHOLDER_ASSET),
            ("Crate/Box", PLACEHOLDER_ASSET),
            ("Spring/Trampoline", PLACEHOLDER_ASSET),
            ("Checkpoint Flag", PLACEHOLDER_ASSET),
        ],
    ),
    (
        "Environment",
        &[
            ("Background", PLACEHOLDER_ASSET),
            ("Clouds", PLACEHOLDER_ASSET),
            ("Mountains", PLACEHOLDER_ASSET),
            ("Water", PLACEHOLDER_ASSET),
            ("Trees", PLACEHOLDER_ASSET),
            ("Weather Effect", PLACEHOLDER_ASSET),
        ],
    ),
    (
        "Triggers & Logic",
        &[
            ("Checkpoints", PLACEHOLDER_ASSET),
            ("Level End Trigger", PLACEHOLDER_ASSET),
            ("Timed Trigger", PLACEHOLDER_ASSET),
            ("Pressure Plate", PLACEHOLDER_ASSET),
            ("Enemy Spawn Zone", PLACEHOLDER_ASSET),
        ],
    ),
    (
        "UI/Gameplay Systems",
        &[
            ("Score Display", PLACEHOLDER_ASSET),
            ("Health Bar", PLACEHOLDER_ASSET),
            ("Timer", PLACEHOLDER_ASSET),
            ("Mini Map", PLACEHOLDER_ASSET),
        ],
    ),
];

impl PaletteCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock catalog shipped with the editor.
    pub fn stock() -> Self {
        let categories = STOCK_CATALOG
            .iter()
            .map(|(name, entries)| PaletteCategory {
                name: (*name).to_string(),
                entries: entries
                    .iter()
                    .map(|(n, img)| PaletteEntry::new(*n, *img))
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Adds a category (appended after the existing ones).
    pub fn add_category(&mut self, name: impl Into<String>, entries: Vec<PaletteEntry>) {
        self.categories.push(PaletteCategory {
            name: name.into(),
            entries,
        });
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[PaletteCategory] {
        &self.categories
    }

    /// Finds an entry by exact name across all categories.
    pub fn find(&self, name: &str) -> Option<&PaletteEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .find(|e| e.name == name)
    }

    /// Case-insensitive substring search across all categories.
    pub fn search(&self, query: &str) -> Vec<&PaletteEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self
                .categories
                .iter()
                .flat_map(|c| c.entries.iter())
                .collect();
        }
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a drag-and-drop payload into a palette entry.
///
/// Payloads are JSON-serialized entries. A payload that does not parse is
/// an error for the caller to log and drop; no object is created.
pub fn parse_drop_payload(payload: &str) -> Result<PaletteEntry, ImportError> {
    serde_json::from_str(payload).map_err(|e| ImportError::MalformedPayload {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_catalog_has_categories_and_entries() {
        let catalog = PaletteCatalog::stock();
        assert!(catalog.categories().len() >= 8);
        assert!(catalog.len() > 40);
        assert!(catalog.find("Main Player").is_some());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = PaletteCatalog::stock();
        let hits = catalog.search("PLATFORM");
        assert!(hits.iter().any(|e| e.name == "Platforms"));
        assert!(hits.iter().any(|e| e.name == "Moving Platform"));
    }

    #[test]
    fn parses_round_tripped_payload() {
        let entry = PaletteEntry::new("Spikes", "assets/spikes.png");
        let payload = serde_json::to_string(&entry).unwrap();
        assert_eq!(parse_drop_payload(&payload).unwrap(), entry);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_drop_payload("not json at all").is_err());
        assert!(parse_drop_payload("{\"name\": \"x\"}").is_err());
    }
}
