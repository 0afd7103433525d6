//! Search and filter over entries
//!
//! An entry matches when its name, or its world type / role, contains the
//! search text (case-insensitive) and its kind passes the type filter.

use crate::entries::types::{EntryKind, ProjectEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Restricts results to one entry kind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    World,
    Character,
}

impl TypeFilter {
    pub fn accepts(&self, kind: EntryKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::World => kind == EntryKind::World,
            TypeFilter::Character => kind == EntryKind::Character,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::World => write!(f, "world"),
            TypeFilter::Character => write!(f, "character"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "world" | "worlds" => Ok(TypeFilter::World),
            "character" | "characters" => Ok(TypeFilter::Character),
            _ => Err(format!("Unknown type filter: {}", s)),
        }
    }
}

/// Does a single entry match the search text and type filter
pub fn matches(entry: &ProjectEntry, text: &str, filter: TypeFilter) -> bool {
    if !filter.accepts(entry.kind()) {
        return false;
    }

    let needle = text.to_lowercase();
    entry.name.to_lowercase().contains(&needle)
        || entry.secondary_label().to_lowercase().contains(&needle)
}

/// Matching entries, in their original order
pub fn filter_entries<'a>(
    entries: &'a [ProjectEntry],
    text: &str,
    filter: TypeFilter,
) -> Vec<&'a ProjectEntry> {
    let results: Vec<&ProjectEntry> = entries
        .iter()
        .filter(|e| matches(e, text, filter))
        .collect();

    tracing::debug!(
        text = %text,
        filter = %filter,
        matched = results.len(),
        total = entries.len(),
        "Filtered entries"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::types::{
        CharacterDetails, EntryDetails, EntryId, Personality, WorldDetails, WorldType,
    };
    use chrono::Utc;

    fn world(name: &str, world_type: WorldType) -> ProjectEntry {
        ProjectEntry {
            id: EntryId::generate(),
            name: name.to_string(),
            created_at: Utc::now(),
            details: EntryDetails::World(WorldDetails {
                world_type,
                key_elements: String::new(),
                lore_history: String::new(),
            }),
        }
    }

    fn character(name: &str, role: &str) -> ProjectEntry {
        ProjectEntry {
            id: EntryId::generate(),
            name: name.to_string(),
            created_at: Utc::now(),
            details: EntryDetails::Character(CharacterDetails {
                role: role.to_string(),
                motivation: String::new(),
                personality: Personality::default(),
                personality_analysis: String::new(),
            }),
        }
    }

    fn sample() -> Vec<ProjectEntry> {
        vec![
            world("Eldoria", WorldType::HighFantasy),
            character("Mira", "Smuggler"),
            world("Neon Reach", WorldType::Cyberpunk),
            character("Tomas", "Fantasy novelist"),
        ]
    }

    fn names(results: &[&ProjectEntry]) -> Vec<String> {
        results.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_empty_search_returns_everything_in_order() {
        let entries = sample();
        let results = filter_entries(&entries, "", TypeFilter::All);
        assert_eq!(names(&results), vec!["Eldoria", "Mira", "Neon Reach", "Tomas"]);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let entries = sample();
        let results = filter_entries(&entries, "NEON", TypeFilter::All);
        assert_eq!(names(&results), vec!["Neon Reach"]);
    }

    #[test]
    fn test_secondary_field_match() {
        let entries = sample();

        // world type of Eldoria and role of Tomas
        let results = filter_entries(&entries, "fantasy", TypeFilter::All);
        assert_eq!(names(&results), vec!["Eldoria", "Tomas"]);

        let results = filter_entries(&entries, "smuggler", TypeFilter::All);
        assert_eq!(names(&results), vec!["Mira"]);
    }

    #[test]
    fn test_type_filter_is_anded() {
        let entries = sample();

        let results = filter_entries(&entries, "fantasy", TypeFilter::Character);
        assert_eq!(names(&results), vec!["Tomas"]);

        let results = filter_entries(&entries, "", TypeFilter::World);
        assert_eq!(names(&results), vec!["Eldoria", "Neon Reach"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let entries = sample();
        assert!(filter_entries(&entries, "zeppelin", TypeFilter::All).is_empty());
    }

    #[test]
    fn test_type_filter_parsing() {
        assert_eq!("World".parse::<TypeFilter>(), Ok(TypeFilter::World));
        assert_eq!("characters".parse::<TypeFilter>(), Ok(TypeFilter::Character));
        assert!("books".parse::<TypeFilter>().is_err());
    }
}
