//! World and character builder flows
//!
//! A draft holds what the writer typed into a form. Building it assigns the
//! id and creation time (and, for characters, the personality analysis) and
//! produces a [`ProjectEntry`] ready for [`EntryStore::add`].
//!
//! [`EntryStore::add`]: crate::entries::EntryStore::add

use crate::entries::error::{EntryError, EntryResult};
use crate::entries::types::{
    CharacterDetails, EntryDetails, EntryId, Personality, ProjectEntry, WorldDetails, WorldType,
};
use crate::personality::analyze_personality;
use chrono::Utc;
use rand::Rng;

/// Form input for a new world
#[derive(Debug, Clone)]
pub struct WorldDraft {
    pub name: String,
    pub world_type: WorldType,
    pub key_elements: String,
    pub lore_history: String,
}

impl WorldDraft {
    pub fn new(name: impl Into<String>, world_type: WorldType) -> Self {
        Self {
            name: name.into(),
            world_type,
            key_elements: String::new(),
            lore_history: String::new(),
        }
    }

    pub fn key_elements(mut self, key_elements: impl Into<String>) -> Self {
        self.key_elements = key_elements.into();
        self
    }

    pub fn lore_history(mut self, lore_history: impl Into<String>) -> Self {
        self.lore_history = lore_history.into();
        self
    }

    /// Create the entry with a fresh id and the current time
    pub fn build(self) -> EntryResult<ProjectEntry> {
        if self.name.trim().is_empty() {
            return Err(EntryError::MissingField("name"));
        }

        Ok(ProjectEntry {
            id: EntryId::generate(),
            name: self.name,
            created_at: Utc::now(),
            details: EntryDetails::World(WorldDetails {
                world_type: self.world_type,
                key_elements: self.key_elements,
                lore_history: self.lore_history,
            }),
        })
    }

    /// A creative prompt shown after the world is saved
    pub fn feedback<R: Rng>(&self, rng: &mut R) -> String {
        let name = &self.name;
        let genre = self.world_type.label().to_lowercase();
        let prompts = [
            format!("The concept of a {genre} world called \"{name}\" is intriguing. How do the inhabitants adapt to the unique challenges of this environment?"),
            format!("\"{name}\" sounds like a fascinating setting. What conflicts might arise from the key elements you've described?"),
            format!("The world-building details for \"{name}\" create rich storytelling opportunities. Consider what daily life looks like for ordinary people in this world."),
            format!("Your {genre} world has strong potential. What are the unspoken rules that govern society in \"{name}\"?"),
            "The historical elements you've outlined suggest deep lore. What ancient mysteries or forgotten knowledge might characters discover?".to_string(),
        ];
        pick(prompts, rng)
    }
}

/// Form input for a new character
#[derive(Debug, Clone)]
pub struct CharacterDraft {
    pub name: String,
    pub role: String,
    pub motivation: String,
    pub personality: Personality,
}

impl CharacterDraft {
    /// Start a draft with every trait at the neutral midpoint
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            motivation: String::new(),
            personality: Personality::default(),
        }
    }

    pub fn motivation(mut self, motivation: impl Into<String>) -> Self {
        self.motivation = motivation.into();
        self
    }

    pub fn personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    /// Create the entry, taking the personality analysis snapshot now
    pub fn build(self) -> EntryResult<ProjectEntry> {
        if self.name.trim().is_empty() {
            return Err(EntryError::MissingField("name"));
        }
        if self.role.trim().is_empty() {
            return Err(EntryError::MissingField("role"));
        }
        self.personality.validate()?;

        let analysis = analyze_personality(&self.personality);

        Ok(ProjectEntry {
            id: EntryId::generate(),
            name: self.name,
            created_at: Utc::now(),
            details: EntryDetails::Character(CharacterDetails {
                role: self.role,
                motivation: self.motivation,
                personality: self.personality,
                personality_analysis: analysis,
            }),
        })
    }

    /// A creative prompt shown after the character is saved
    pub fn feedback<R: Rng>(&self, rng: &mut R) -> String {
        let name = &self.name;
        let role = &self.role;
        let motivation = &self.motivation;
        let prompts = [
            format!("\"{name}\" sounds like a compelling character. What obstacles will they face in pursuing their goal of \"{motivation}\"?"),
            format!("The role of {role} creates interesting story possibilities. How does \"{name}\" view their responsibility in this position?"),
            format!("\"{name}\"'s motivation to \"{motivation}\" is a strong driving force. What personal sacrifices might they have to make?"),
            format!("This character's personality profile suggests fascinating internal conflicts. How do these traits create challenges for \"{name}\"?"),
            format!("The combination of being a {role} with the goal of \"{motivation}\" could lead to intriguing moral dilemmas. What lines won't they cross?"),
        ];
        pick(prompts, rng)
    }
}

fn pick<R: Rng, const N: usize>(options: [String; N], rng: &mut R) -> String {
    let idx = rng.gen_range(0..N);
    options.into_iter().nth(idx).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::types::EntryKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_world_build_assigns_identity() {
        let a = WorldDraft::new("Eldoria", WorldType::HighFantasy)
            .key_elements("ley lines")
            .build()
            .unwrap();
        let b = WorldDraft::new("Eldoria", WorldType::HighFantasy).build().unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.kind(), EntryKind::World);
        assert_eq!(a.as_world().unwrap().key_elements, "ley lines");
    }

    #[test]
    fn test_required_fields() {
        assert!(matches!(
            WorldDraft::new("  ", WorldType::Medieval).build(),
            Err(EntryError::MissingField("name"))
        ));
        assert!(matches!(
            CharacterDraft::new("Ash", "").build(),
            Err(EntryError::MissingField("role"))
        ));
    }

    #[test]
    fn test_character_build_stores_analysis() {
        let personality = Personality::new(5, 1, 3, 2, 5).unwrap();
        let entry = CharacterDraft::new("Ash", "Thief")
            .motivation("Steal the crown")
            .personality(personality)
            .build()
            .unwrap();

        let details = entry.as_character().unwrap();
        assert_eq!(details.personality_analysis, analyze_personality(&personality));
        assert!(details.personality_analysis.starts_with("This character is"));
    }

    #[test]
    fn test_character_defaults_to_neutral_traits() {
        let draft = CharacterDraft::new("Ash", "Thief");
        assert_eq!(draft.personality, Personality::default());
        assert_eq!(draft.personality.openness, 3);
    }

    #[test]
    fn test_character_build_rejects_invalid_traits() {
        let mut draft = CharacterDraft::new("Ash", "Thief");
        draft.personality.conscientiousness = 0;
        assert!(matches!(draft.build(), Err(EntryError::InvalidRange { .. })));
    }

    #[test]
    fn test_feedback_mentions_the_entry() {
        let mut rng = StdRng::seed_from_u64(7);
        let world = WorldDraft::new("Neon Reach", WorldType::Cyberpunk);

        for _ in 0..20 {
            let text = world.feedback(&mut rng);
            assert!(
                text.contains("Neon Reach") || text.starts_with("The historical elements"),
                "unexpected feedback: {}",
                text
            );
            assert!(!text.contains("Cyberpunk"));
        }

        let character = CharacterDraft::new("Ash", "Thief").motivation("Steal the crown");
        let text = character.feedback(&mut rng);
        assert!(text.contains("Ash") || text.contains("Thief"));
    }
}
