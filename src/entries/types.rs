//! Core data types for project entries
//!
//! This module defines the records a writer keeps for a creative project:
//! - `ProjectEntry`: shared header (id, name, creation time) plus variant details
//! - `WorldDetails` / `CharacterDetails`: the two entry variants
//! - `Personality`: the Big Five trait vector attached to characters
//! - `EntryPatch`: partial-field update applied by the store

use crate::entries::error::{EntryError, EntryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest value a personality trait may take
pub const TRAIT_MIN: u8 = 1;
/// Highest value a personality trait may take
pub const TRAIT_MAX: u8 = 5;
/// Value new characters start with for every trait
pub const TRAIT_NEUTRAL: u8 = 3;

/// Unique identifier of an entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which variant an entry is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    World,
    Character,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::World => write!(f, "world"),
            EntryKind::Character => write!(f, "character"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "world" | "worlds" => Ok(EntryKind::World),
            "character" | "characters" => Ok(EntryKind::Character),
            _ => Err(format!("Unknown entry kind: {}", s)),
        }
    }
}

/// Setting genre of a world
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorldType {
    #[serde(rename = "High Fantasy")]
    HighFantasy,
    #[serde(rename = "Low Fantasy")]
    LowFantasy,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    #[serde(rename = "Cyberpunk")]
    Cyberpunk,
    #[serde(rename = "Steampunk")]
    Steampunk,
    #[serde(rename = "Post-Apocalyptic")]
    PostApocalyptic,
    #[serde(rename = "Modern Fantasy")]
    ModernFantasy,
    #[serde(rename = "Historical Fiction")]
    HistoricalFiction,
    #[serde(rename = "Space Opera")]
    SpaceOpera,
    #[serde(rename = "Dystopian")]
    Dystopian,
    #[serde(rename = "Utopian")]
    Utopian,
    #[serde(rename = "Alternate History")]
    AlternateHistory,
    #[serde(rename = "Contemporary")]
    Contemporary,
    #[serde(rename = "Medieval")]
    Medieval,
}

impl WorldType {
    /// All world types in menu order
    pub fn all() -> &'static [WorldType] {
        &[
            WorldType::HighFantasy,
            WorldType::LowFantasy,
            WorldType::ScienceFiction,
            WorldType::Cyberpunk,
            WorldType::Steampunk,
            WorldType::PostApocalyptic,
            WorldType::ModernFantasy,
            WorldType::HistoricalFiction,
            WorldType::SpaceOpera,
            WorldType::Dystopian,
            WorldType::Utopian,
            WorldType::AlternateHistory,
            WorldType::Contemporary,
            WorldType::Medieval,
        ]
    }

    /// Human-readable label, as shown to the writer and stored in snapshots
    pub fn label(&self) -> &'static str {
        match self {
            WorldType::HighFantasy => "High Fantasy",
            WorldType::LowFantasy => "Low Fantasy",
            WorldType::ScienceFiction => "Science Fiction",
            WorldType::Cyberpunk => "Cyberpunk",
            WorldType::Steampunk => "Steampunk",
            WorldType::PostApocalyptic => "Post-Apocalyptic",
            WorldType::ModernFantasy => "Modern Fantasy",
            WorldType::HistoricalFiction => "Historical Fiction",
            WorldType::SpaceOpera => "Space Opera",
            WorldType::Dystopian => "Dystopian",
            WorldType::Utopian => "Utopian",
            WorldType::AlternateHistory => "Alternate History",
            WorldType::Contemporary => "Contemporary",
            WorldType::Medieval => "Medieval",
        }
    }
}

impl fmt::Display for WorldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorldType {
    type Err = String;

    /// Accepts the label in any case, with spaces, hyphens or underscores
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |v: &str| {
            v.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = normalize(s);

        WorldType::all()
            .iter()
            .copied()
            .find(|t| normalize(t.label()) == wanted)
            .ok_or_else(|| format!("Unknown world type: {}", s))
    }
}

/// One of the five Big Five dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Trait {
    /// Canonical evaluation order
    pub const ORDER: [Trait; 5] = [
        Trait::Openness,
        Trait::Conscientiousness,
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Neuroticism,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Trait::Openness => "openness",
            Trait::Conscientiousness => "conscientiousness",
            Trait::Extraversion => "extraversion",
            Trait::Agreeableness => "agreeableness",
            Trait::Neuroticism => "neuroticism",
        }
    }
}

/// Big Five personality vector, each trait in [1, 5]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Personality {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            openness: TRAIT_NEUTRAL,
            conscientiousness: TRAIT_NEUTRAL,
            extraversion: TRAIT_NEUTRAL,
            agreeableness: TRAIT_NEUTRAL,
            neuroticism: TRAIT_NEUTRAL,
        }
    }
}

impl Personality {
    /// Build a validated trait vector
    pub fn new(
        openness: u8,
        conscientiousness: u8,
        extraversion: u8,
        agreeableness: u8,
        neuroticism: u8,
    ) -> EntryResult<Self> {
        let personality = Self {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
        };
        personality.validate()?;
        Ok(personality)
    }

    pub fn get(&self, t: Trait) -> u8 {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }

    /// Builder method: set one trait (unchecked until `validate`)
    pub fn with(mut self, t: Trait, value: u8) -> Self {
        match t {
            Trait::Openness => self.openness = value,
            Trait::Conscientiousness => self.conscientiousness = value,
            Trait::Extraversion => self.extraversion = value,
            Trait::Agreeableness => self.agreeableness = value,
            Trait::Neuroticism => self.neuroticism = value,
        }
        self
    }

    /// Check every trait lies in [TRAIT_MIN, TRAIT_MAX]
    pub fn validate(&self) -> EntryResult<()> {
        for t in Trait::ORDER {
            let value = self.get(t);
            if !(TRAIT_MIN..=TRAIT_MAX).contains(&value) {
                return Err(EntryError::InvalidRange {
                    trait_name: t.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Fields specific to a world entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldDetails {
    pub world_type: WorldType,
    #[serde(default)]
    pub key_elements: String,
    #[serde(default)]
    pub lore_history: String,
}

/// Fields specific to a character entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetails {
    pub role: String,
    #[serde(default)]
    pub motivation: String,
    pub personality: Personality,
    /// Snapshot of the analysis taken when the character was created.
    /// Not refreshed when `personality` changes.
    #[serde(default)]
    pub personality_analysis: String,
}

/// Variant-specific part of an entry, tagged by `type` in snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryDetails {
    World(WorldDetails),
    Character(CharacterDetails),
}

/// A stored world or character record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: EntryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl ProjectEntry {
    pub fn kind(&self) -> EntryKind {
        match self.details {
            EntryDetails::World(_) => EntryKind::World,
            EntryDetails::Character(_) => EntryKind::Character,
        }
    }

    pub fn as_world(&self) -> Option<&WorldDetails> {
        match &self.details {
            EntryDetails::World(w) => Some(w),
            EntryDetails::Character(_) => None,
        }
    }

    pub fn as_character(&self) -> Option<&CharacterDetails> {
        match &self.details {
            EntryDetails::Character(c) => Some(c),
            EntryDetails::World(_) => None,
        }
    }

    /// The field searched besides the name: world type or character role
    pub fn secondary_label(&self) -> String {
        match &self.details {
            EntryDetails::World(w) => w.world_type.label().to_string(),
            EntryDetails::Character(c) => c.role.clone(),
        }
    }

    /// Validate invariants that the store enforces on add and update
    pub fn validate(&self) -> EntryResult<()> {
        if let EntryDetails::Character(c) = &self.details {
            c.personality.validate()?;
        }
        Ok(())
    }
}

/// Partial update of an entry.
///
/// `id`, `type` and `createdAt` have no counterpart here and can never be
/// overwritten. Fields that do not belong to the target's variant are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_type: Option<WorldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_elements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_analysis: Option<String>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn world_type(mut self, world_type: WorldType) -> Self {
        self.world_type = Some(world_type);
        self
    }

    pub fn key_elements(mut self, key_elements: impl Into<String>) -> Self {
        self.key_elements = Some(key_elements.into());
        self
    }

    pub fn lore_history(mut self, lore_history: impl Into<String>) -> Self {
        self.lore_history = Some(lore_history.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn motivation(mut self, motivation: impl Into<String>) -> Self {
        self.motivation = Some(motivation.into());
        self
    }

    pub fn personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    pub fn personality_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.personality_analysis = Some(analysis.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of supplied fields that do not apply to entries of `kind`
    pub fn foreign_fields(&self, kind: EntryKind) -> Vec<&'static str> {
        let mut fields = Vec::new();
        match kind {
            EntryKind::World => {
                if self.role.is_some() {
                    fields.push("role");
                }
                if self.motivation.is_some() {
                    fields.push("motivation");
                }
                if self.personality.is_some() {
                    fields.push("personality");
                }
                if self.personality_analysis.is_some() {
                    fields.push("personalityAnalysis");
                }
            }
            EntryKind::Character => {
                if self.world_type.is_some() {
                    fields.push("worldType");
                }
                if self.key_elements.is_some() {
                    fields.push("keyElements");
                }
                if self.lore_history.is_some() {
                    fields.push("loreHistory");
                }
            }
        }
        fields
    }

    /// Merge supplied fields over `entry`. Identity fields are untouched.
    pub fn apply_to(&self, entry: &mut ProjectEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }

        match &mut entry.details {
            EntryDetails::World(w) => {
                if let Some(world_type) = self.world_type {
                    w.world_type = world_type;
                }
                if let Some(key_elements) = &self.key_elements {
                    w.key_elements = key_elements.clone();
                }
                if let Some(lore_history) = &self.lore_history {
                    w.lore_history = lore_history.clone();
                }
            }
            EntryDetails::Character(c) => {
                if let Some(role) = &self.role {
                    c.role = role.clone();
                }
                if let Some(motivation) = &self.motivation {
                    c.motivation = motivation.clone();
                }
                if let Some(personality) = self.personality {
                    c.personality = personality;
                }
                if let Some(analysis) = &self.personality_analysis {
                    c.personality_analysis = analysis.clone();
                }
            }
        }
    }
}
