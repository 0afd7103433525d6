//! Advice engine
//!
//! Answers a writer's free-text question by matching keywords against a
//! fixed, ordered rule chain and filling the winning template with details
//! from the first matching entries.
//!
//! | Priority | Keyword | Needs |
//! |---|---|---|
//! | 1 | `conflict` | two characters |
//! | 2 | `plot` | a world and a character |
//! | 3 | `character development` | nothing (generic tip without characters) |
//! | 4 | `world building` / `worldbuilding` | nothing (generic tip without worlds) |
//! | 5 | `motivation` | a character |
//! | - | anything else | random general advice |

pub mod rules;
pub mod synthesizer;

pub use rules::{
    compose_advice, AdviceContext, AdviceKind, AdviceRule, ADVICE_RULES, GENERAL_ADVICE,
    SUGGESTED_QUERIES,
};
pub use synthesizer::{AdviceRecord, AdviceSynthesizer};
