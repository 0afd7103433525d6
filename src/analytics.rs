//! Project statistics
//!
//! Counts, distributions, average personality and heuristic insights over
//! the current entry list. Unlike the advice chain, every insight rule is
//! evaluated independently and all that hold are reported.

use crate::entries::types::{Personality, ProjectEntry, Trait};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Width of the "recent activity" window
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Recent entries needed for the momentum insight
pub const MOMENTUM_THRESHOLD: usize = 3;

/// Count of entries sharing one label, in order of first occurrence
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Mean of each trait across all characters, to one decimal place
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TraitAverages {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl TraitAverages {
    /// `None` when there are no characters
    pub fn from_personalities(personalities: &[&Personality]) -> Option<Self> {
        if personalities.is_empty() {
            return None;
        }

        let mean = |t: Trait| {
            let sum: u32 = personalities.iter().map(|p| u32::from(p.get(t))).sum();
            round_one_decimal(f64::from(sum) / personalities.len() as f64)
        };

        Some(Self {
            openness: mean(Trait::Openness),
            conscientiousness: mean(Trait::Conscientiousness),
            extraversion: mean(Trait::Extraversion),
            agreeableness: mean(Trait::Agreeableness),
            neuroticism: mean(Trait::Neuroticism),
        })
    }

    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }
}

/// Everything the status view shows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectStats {
    pub total_entries: usize,
    pub recent_entries: usize,
    pub world_count: usize,
    pub character_count: usize,
    pub world_types: Vec<Bucket>,
    pub character_roles: Vec<Bucket>,
    pub average_personality: Option<TraitAverages>,
    pub insights: Vec<String>,
}

/// Counts the insight rules look at
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs {
    pub worlds: usize,
    pub characters: usize,
    pub recent: usize,
}

/// An insight reported whenever its condition holds
pub struct InsightRule {
    pub name: &'static str,
    pub applies: fn(&InsightInputs) -> bool,
    pub message: &'static str,
}

/// Insight rules, in report order
pub const INSIGHT_RULES: [InsightRule; 5] = [
    InsightRule {
        name: "no_worlds",
        applies: |i| i.worlds == 0,
        message: "Consider creating a world to establish the setting for your characters.",
    },
    InsightRule {
        name: "no_characters",
        applies: |i| i.characters == 0,
        message: "Add some characters to populate your creative world.",
    },
    InsightRule {
        name: "balanced",
        applies: |i| i.worlds > 0 && i.characters > 0,
        message: "Great balance! You have both worlds and characters to develop rich stories.",
    },
    InsightRule {
        name: "crowded",
        applies: |i| i.characters > i.worlds * 3,
        message: "You have many characters - consider how they interact across different worlds or locations.",
    },
    InsightRule {
        name: "momentum",
        applies: |i| i.recent >= MOMENTUM_THRESHOLD,
        message: "You've been very productive recently! Your creative momentum is strong.",
    },
];

/// Messages of every insight rule that holds
pub fn project_insights(inputs: &InsightInputs) -> Vec<String> {
    INSIGHT_RULES
        .iter()
        .filter(|rule| (rule.applies)(inputs))
        .map(|rule| {
            tracing::debug!(rule = rule.name, "Insight rule fired");
            rule.message.to_string()
        })
        .collect()
}

/// Summarize the entries as of now
pub fn summarize(entries: &[ProjectEntry]) -> ProjectStats {
    summarize_at(entries, Utc::now())
}

/// Summarize the entries as of `now`
pub fn summarize_at(entries: &[ProjectEntry], now: DateTime<Utc>) -> ProjectStats {
    let window_start = now - Duration::days(RECENT_WINDOW_DAYS);

    let mut world_types = Vec::new();
    let mut character_roles = Vec::new();
    let mut personalities = Vec::new();
    let mut world_count = 0;
    let mut recent_entries = 0;

    for entry in entries {
        if entry.created_at >= window_start {
            recent_entries += 1;
        }

        if let Some(world) = entry.as_world() {
            world_count += 1;
            tally(&mut world_types, world.world_type.label());
        } else if let Some(character) = entry.as_character() {
            tally(&mut character_roles, &character.role);
            personalities.push(&character.personality);
        }
    }

    let character_count = personalities.len();
    let insights = project_insights(&InsightInputs {
        worlds: world_count,
        characters: character_count,
        recent: recent_entries,
    });

    tracing::debug!(
        total = entries.len(),
        recent = recent_entries,
        insights = insights.len(),
        "Summarized project"
    );

    ProjectStats {
        total_entries: entries.len(),
        recent_entries,
        world_count,
        character_count,
        world_types,
        character_roles,
        average_personality: TraitAverages::from_personalities(&personalities),
        insights,
    }
}

fn tally(buckets: &mut Vec<Bucket>, label: &str) {
    match buckets.iter_mut().find(|b| b.label == label) {
        Some(bucket) => bucket.count += 1,
        None => buckets.push(Bucket {
            label: label.to_string(),
            count: 1,
        }),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::types::{CharacterDetails, EntryDetails, EntryId, WorldDetails, WorldType};

    fn now() -> DateTime<Utc> {
        "2024-06-15T12:00:00Z".parse().unwrap()
    }

    fn world(world_type: WorldType, days_ago: i64) -> ProjectEntry {
        ProjectEntry {
            id: EntryId::generate(),
            name: "World".to_string(),
            created_at: now() - Duration::days(days_ago),
            details: EntryDetails::World(WorldDetails {
                world_type,
                key_elements: String::new(),
                lore_history: String::new(),
            }),
        }
    }

    fn character(role: &str, traits: [u8; 5], days_ago: i64) -> ProjectEntry {
        let [o, c, e, a, n] = traits;
        ProjectEntry {
            id: EntryId::generate(),
            name: "Character".to_string(),
            created_at: now() - Duration::days(days_ago),
            details: EntryDetails::Character(CharacterDetails {
                role: role.to_string(),
                motivation: String::new(),
                personality: Personality::new(o, c, e, a, n).unwrap(),
                personality_analysis: String::new(),
            }),
        }
    }

    #[test]
    fn test_empty_project() {
        let stats = summarize_at(&[], now());

        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.recent_entries, 0);
        assert!(stats.average_personality.is_none());
        assert_eq!(
            stats.insights,
            vec![
                "Consider creating a world to establish the setting for your characters.",
                "Add some characters to populate your creative world.",
            ]
        );
    }

    #[test]
    fn test_same_world_type_collapses_to_one_bucket() {
        let entries = vec![
            world(WorldType::Cyberpunk, 30),
            world(WorldType::Cyberpunk, 20),
            world(WorldType::Cyberpunk, 10),
        ];
        let stats = summarize_at(&entries, now());

        assert_eq!(
            stats.world_types,
            vec![Bucket {
                label: "Cyberpunk".to_string(),
                count: 3
            }]
        );
        assert!(stats.character_roles.is_empty());
        assert!(stats.average_personality.is_none());
    }

    #[test]
    fn test_buckets_keep_first_occurrence_order() {
        let entries = vec![
            character("Mentor", [3; 5], 40),
            character("Villain", [3; 5], 40),
            character("Mentor", [3; 5], 40),
        ];
        let stats = summarize_at(&entries, now());

        let labels: Vec<(&str, usize)> = stats
            .character_roles
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect();
        assert_eq!(labels, vec![("Mentor", 2), ("Villain", 1)]);
    }

    #[test]
    fn test_trait_averages_round_to_one_decimal() {
        let entries = vec![
            character("A", [5, 1, 3, 2, 4], 40),
            character("B", [4, 1, 3, 2, 4], 40),
            character("C", [4, 2, 3, 2, 5], 40),
        ];
        let averages = summarize_at(&entries, now()).average_personality.unwrap();

        assert_eq!(averages.openness, 4.3);
        assert_eq!(averages.conscientiousness, 1.3);
        assert_eq!(averages.extraversion, 3.0);
        assert_eq!(averages.agreeableness, 2.0);
        assert_eq!(averages.neuroticism, 4.3);
    }

    #[test]
    fn test_recent_window_is_seven_days() {
        let entries = vec![
            world(WorldType::Medieval, 0),
            world(WorldType::Medieval, 7),
            world(WorldType::Medieval, 8),
        ];
        let stats = summarize_at(&entries, now());
        assert_eq!(stats.recent_entries, 2);
        assert!(!stats.insights.iter().any(|i| i.contains("momentum")));
    }

    #[test]
    fn test_insights_are_independent() {
        // one world, four characters, all recent
        let mut entries = vec![world(WorldType::SpaceOpera, 1)];
        for _ in 0..4 {
            entries.push(character("Pilot", [3; 5], 1));
        }
        let stats = summarize_at(&entries, now());

        assert_eq!(stats.world_count, 1);
        assert_eq!(stats.character_count, 4);
        assert_eq!(
            stats.insights,
            vec![
                "Great balance! You have both worlds and characters to develop rich stories.",
                "You have many characters - consider how they interact across different worlds or locations.",
                "You've been very productive recently! Your creative momentum is strong.",
            ]
        );
    }

    #[test]
    fn test_insight_rule_names_are_distinct() {
        let mut names: Vec<&str> = INSIGHT_RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), INSIGHT_RULES.len());
    }

    #[test]
    fn test_characters_without_worlds() {
        let entries = vec![character("Bard", [3; 5], 30)];
        let stats = summarize_at(&entries, now());

        // 1 > 0 * 3, so the crowding insight fires too
        assert_eq!(stats.insights.len(), 2);
        assert!(stats.insights[0].starts_with("Consider creating a world"));
        assert!(stats.insights[1].starts_with("You have many characters"));
    }
}
