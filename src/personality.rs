//! Personality analyzer
//!
//! Turns a Big Five trait vector into a short character sketch. Both the
//! per-trait descriptors and the behavioral predictions are fixed tables
//! evaluated in order, so the output is fully deterministic.

use crate::entries::types::{Personality, Trait};

/// A trait value at or above this reads as "high"
pub const HIGH_THRESHOLD: u8 = 4;
/// A trait value at or below this reads as "low"
pub const LOW_THRESHOLD: u8 = 2;

/// Descriptor phrases for one trait
struct TraitDescriptor {
    dimension: Trait,
    high: &'static str,
    low: &'static str,
}

const DESCRIPTORS: [TraitDescriptor; 5] = [
    TraitDescriptor {
        dimension: Trait::Openness,
        high: "highly creative and imaginative",
        low: "practical and conventional",
    },
    TraitDescriptor {
        dimension: Trait::Conscientiousness,
        high: "extremely organized and reliable",
        low: "spontaneous and flexible",
    },
    TraitDescriptor {
        dimension: Trait::Extraversion,
        high: "outgoing and energetic",
        low: "reserved and introspective",
    },
    TraitDescriptor {
        dimension: Trait::Agreeableness,
        high: "very cooperative and trusting",
        low: "competitive and skeptical",
    },
    TraitDescriptor {
        dimension: Trait::Neuroticism,
        high: "emotionally sensitive and reactive",
        low: "emotionally stable and resilient",
    },
];

/// A prediction that fires when its trait conjunction holds
pub struct BehaviorRule {
    pub name: &'static str,
    pub applies: fn(&Personality) -> bool,
    pub prediction: &'static str,
}

/// Behavioral predictions, in output order
pub const BEHAVIOR_RULES: [BehaviorRule; 3] = [
    BehaviorRule {
        name: "steady_planner",
        applies: |p| is_high(p.conscientiousness) && is_low(p.neuroticism),
        prediction: "They will likely be a reliable planner who handles stress well",
    },
    BehaviorRule {
        name: "charismatic_confronter",
        applies: |p| is_low(p.agreeableness) && is_high(p.extraversion),
        prediction: "They may be confrontational but charismatic in their interactions",
    },
    BehaviorRule {
        name: "unfinished_visionary",
        applies: |p| is_high(p.openness) && is_low(p.conscientiousness),
        prediction: "They'll likely pursue creative solutions but may struggle with follow-through",
    },
];

/// Description used when no trait leaves the neutral band
pub const BALANCED_DESCRIPTION: &str = "balanced and well-rounded";

fn is_high(value: u8) -> bool {
    value >= HIGH_THRESHOLD
}

fn is_low(value: u8) -> bool {
    value <= LOW_THRESHOLD
}

/// Descriptor phrases for every non-neutral trait, in trait order
pub fn trait_descriptors(personality: &Personality) -> Vec<&'static str> {
    DESCRIPTORS
        .iter()
        .filter_map(|d| {
            let value = personality.get(d.dimension);
            if is_high(value) {
                Some(d.high)
            } else if is_low(value) {
                Some(d.low)
            } else {
                None
            }
        })
        .collect()
}

/// Predictions of every behavior rule that holds, in rule order
pub fn behavior_predictions(personality: &Personality) -> Vec<&'static str> {
    BEHAVIOR_RULES
        .iter()
        .filter(|rule| (rule.applies)(personality))
        .map(|rule| {
            tracing::debug!(rule = rule.name, "Behavior rule fired");
            rule.prediction
        })
        .collect()
}

/// Build the full sketch.
///
/// `"This character is {descriptors}."` followed by any predictions joined
/// with `". "` and closed with a period. With no descriptors the clause reads
/// "balanced and well-rounded".
pub fn analyze_personality(personality: &Personality) -> String {
    let descriptors = trait_descriptors(personality);
    let predictions = behavior_predictions(personality);

    let mut analysis = if descriptors.is_empty() {
        format!("This character is {}.", BALANCED_DESCRIPTION)
    } else {
        format!("This character is {}.", descriptors.join(", "))
    };

    if !predictions.is_empty() {
        analysis.push(' ');
        analysis.push_str(&predictions.join(". "));
        analysis.push('.');
    }

    tracing::debug!(
        descriptors = descriptors.len(),
        predictions = predictions.len(),
        "Analyzed personality"
    );

    analysis
}
