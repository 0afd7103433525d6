//! Loreweaver CLI
//!
//! Command-line front end for a creative project codex:
//! - Create worlds and characters
//! - Browse, search, edit and delete entries
//! - Ask for writing advice
//! - Show project statistics

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use loreweaver::config::{Config, Discovered, LoggingConfig};
use loreweaver::entries::{
    CharacterDraft, EntryDetails, EntryId, EntryKind, EntryPatch, EntryStore, JsonSnapshotFile, Personality,
    ProjectEntry, Trait, WorldDraft, WorldType,
};
use loreweaver::{filter_entries, generate_default_config, summarize, AdviceSynthesizer};
use loreweaver::{TypeFilter, SUGGESTED_QUERIES};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "loreweaver")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Creative project codex for worlds and characters")]
#[command(long_about = "Loreweaver keeps the worlds and characters of your story.\nSketch personalities, search your codex, and get rule-based writing advice.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overriding the configured one
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a world
    World {
        /// World name
        name: String,
        /// Setting genre, e.g. "High Fantasy", cyberpunk, space-opera
        #[arg(short = 't', long = "type")]
        world_type: String,
        /// Key elements of the setting
        #[arg(short, long, default_value = "")]
        elements: String,
        /// Lore and history
        #[arg(short, long, default_value = "")]
        lore: String,
    },

    /// Create a character
    Character {
        /// Character name
        name: String,
        /// Role in the story
        #[arg(short, long)]
        role: String,
        /// What drives them
        #[arg(short, long, default_value = "")]
        motivation: String,
        #[command(flatten)]
        traits: TraitArgs,
    },

    /// List entries in the order they were added
    List {
        /// Only the N most recent, newest first
        #[arg(short, long)]
        recent: Option<usize>,
        /// Only one entry kind (world, character)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Show one entry
    Show {
        id: String,
    },

    /// Change fields of an entry
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        world_type: Option<String>,
        #[arg(long)]
        elements: Option<String>,
        #[arg(long)]
        lore: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        motivation: Option<String>,
        #[command(flatten)]
        traits: TraitArgs,
    },

    /// Delete an entry
    Delete {
        id: String,
    },

    /// Recompute a character's personality analysis from its current traits
    Regenerate {
        id: String,
    },

    /// Search entries by name, world type or role
    Search {
        /// Text to look for (empty matches everything)
        #[arg(default_value = "")]
        text: String,
        /// Entry kind (all, world, character)
        #[arg(short, long, default_value = "all")]
        kind: String,
    },

    /// Show project statistics and insights
    Stats,

    /// Ask for creative advice about your project
    Advise {
        /// Your question
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List suggested questions
    Suggest,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Big Five trait values, each 1-5
#[derive(clap::Args, Default)]
pub struct TraitArgs {
    #[arg(long)]
    pub openness: Option<u8>,
    #[arg(long)]
    pub conscientiousness: Option<u8>,
    #[arg(long)]
    pub extraversion: Option<u8>,
    #[arg(long)]
    pub agreeableness: Option<u8>,
    #[arg(long)]
    pub neuroticism: Option<u8>,
}

impl TraitArgs {
    fn is_empty(&self) -> bool {
        self.pairs().iter().all(|(_, v)| v.is_none())
    }

    fn pairs(&self) -> [(Trait, Option<u8>); 5] {
        [
            (Trait::Openness, self.openness),
            (Trait::Conscientiousness, self.conscientiousness),
            (Trait::Extraversion, self.extraversion),
            (Trait::Agreeableness, self.agreeableness),
            (Trait::Neuroticism, self.neuroticism),
        ]
    }

    /// Overlay the supplied values on `base`
    fn apply(&self, base: Personality) -> Personality {
        self.pairs()
            .into_iter()
            .fold(base, |p, (t, v)| match v {
                Some(value) => p.with(t, value),
                None => p,
            })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut discovered = match &cli.config {
        Some(path) => Discovered {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            skipped: Vec::new(),
        },
        None => Config::discover(&Config::default_paths()),
    };
    if let Some(path) = &cli.snapshot {
        discovered.config.storage.snapshot_path = path.to_string_lossy().to_string();
    }

    init_logging(&discovered.config.logging);
    discovered.log();
    let config = discovered.config;

    let json = cli.format == "json";

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Suggest => {
            for query in SUGGESTED_QUERIES {
                println!("  {}", query);
            }
        }

        Commands::World {
            name,
            world_type,
            elements,
            lore,
        } => {
            let world_type: WorldType = world_type.parse().map_err(anyhow::Error::msg)?;
            let draft = WorldDraft::new(name, world_type)
                .key_elements(elements)
                .lore_history(lore);
            let feedback = draft.feedback(&mut StdRng::from_entropy());

            let mut store = open_store(&config)?;

            let entry = draft.build()?;
            let id = entry.id.clone();
            store.add(entry)?;

            print_entry(store.get(&id)?, json)?;
            if !json {
                println!();
                println!("{}", feedback);
            }
        }

        Commands::Character {
            name,
            role,
            motivation,
            traits,
        } => {
            let draft = CharacterDraft::new(name, role)
                .motivation(motivation)
                .personality(traits.apply(Personality::default()));
            let feedback = draft.feedback(&mut StdRng::from_entropy());

            let mut store = open_store(&config)?;

            let entry = draft.build()?;
            let id = entry.id.clone();
            store.add(entry)?;

            print_entry(store.get(&id)?, json)?;
            if !json {
                println!();
                println!("{}", feedback);
            }
        }

        Commands::List { recent, kind } => {
            let kind = kind
                .map(|k| k.parse::<EntryKind>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let store = open_store(&config)?;
            print_entries(&listed(&store, kind, recent), json)?;
        }

        Commands::Show { id } => {
            let store = open_store(&config)?;
            print_entry(store.get(&EntryId::from(id))?, json)?;
        }

        Commands::Update {
            id,
            name,
            world_type,
            elements,
            lore,
            role,
            motivation,
            traits,
        } => {
            let id = EntryId::from(id);
            let mut store = open_store(&config)?;
            let mut patch = EntryPatch {
                name,
                key_elements: elements,
                lore_history: lore,
                role,
                motivation,
                ..Default::default()
            };
            if let Some(world_type) = world_type {
                patch.world_type = Some(world_type.parse().map_err(anyhow::Error::msg)?);
            }
            if !traits.is_empty() {
                let current = match &store.get(&id)?.details {
                    EntryDetails::Character(c) => c.personality,
                    EntryDetails::World(_) => bail!("Entry {} is a world and has no personality", id),
                };
                patch.personality = Some(traits.apply(current));
            }
            if patch.is_empty() {
                bail!("Nothing to update");
            }

            let updated = store.update(&id, &patch)?;
            print_entry(updated, json)?;
            if patch.personality.is_some() && !json {
                println!();
                println!("Personality analysis was kept. Run `loreweaver regenerate {}` to refresh it.", id);
            }
        }

        Commands::Delete { id } => {
            let mut store = open_store(&config)?;
            let removed = store.delete(&EntryId::from(id))?;
            println!("Deleted {} \"{}\"", removed.kind(), removed.name);
        }

        Commands::Regenerate { id } => {
            let mut store = open_store(&config)?;
            let entry = store.regenerate_analysis(&EntryId::from(id))?;
            print_entry(entry, json)?;
        }

        Commands::Search { text, kind } => {
            let filter: TypeFilter = kind.parse().map_err(anyhow::Error::msg)?;
            let store = open_store(&config)?;
            let results = filter_entries(store.list(), &text, filter);
            print_entries(&results, json)?;
        }

        Commands::Stats => {
            let store = open_store(&config)?;
            let stats = summarize(store.list());

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Loreweaver v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Total entries:   {}", stats.total_entries);
                println!("Worlds:          {}", stats.world_count);
                println!("Characters:      {}", stats.character_count);
                println!("Added this week: {}", stats.recent_entries);

                if !stats.world_types.is_empty() {
                    println!();
                    println!("World types:");
                    for bucket in &stats.world_types {
                        println!("  {:<24} {}", bucket.label, bucket.count);
                    }
                }

                if !stats.character_roles.is_empty() {
                    println!();
                    println!("Character roles:");
                    for bucket in &stats.character_roles {
                        println!("  {:<24} {}", bucket.label, bucket.count);
                    }
                }

                if let Some(averages) = stats.average_personality {
                    println!();
                    println!("Average personality:");
                    for t in Trait::ORDER {
                        println!("  {:<24} {:.1}", t.name(), averages.get(t));
                    }
                }

                if !stats.insights.is_empty() {
                    println!();
                    println!("Insights:");
                    for insight in &stats.insights {
                        println!("  - {}", insight);
                    }
                }
            }
        }

        Commands::Advise { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                bail!("Ask a question to get advice");
            }

            let store = open_store(&config)?;
            let mut advisor = AdviceSynthesizer::from_config(&config.advice);
            if !json {
                eprintln!("Generating advice...");
            }
            advisor.synthesize(&query, store.list()).await;

            let record = advisor
                .history()
                .last()
                .context("Advice history is empty after synthesis")?;

            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                println!("{}", record.response);
            }
        }
    }

    Ok(())
}

/// Open the configured snapshot and seed a store from it
fn open_store(config: &Config) -> anyhow::Result<EntryStore> {
    let file = JsonSnapshotFile::new(config.storage.resolved_snapshot_path());
    tracing::debug!("Snapshot file: {:?}", file.path());
    let entries = file
        .load()
        .with_context(|| format!("Failed to load entries from {:?}", file.path()))?;
    Ok(EntryStore::from_snapshot(entries, Box::new(file)))
}

/// Entries for `list`: optionally one kind, optionally only the newest `recent`
fn listed(store: &EntryStore, kind: Option<EntryKind>, recent: Option<usize>) -> Vec<&ProjectEntry> {
    match (kind, recent) {
        (Some(kind), Some(limit)) => store.by_kind(kind).into_iter().rev().take(limit).collect(),
        (Some(kind), None) => store.by_kind(kind),
        (None, Some(limit)) => store.recent(limit),
        (None, None) => store.list().iter().collect(),
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("loreweaver={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_entries(entries: &[&ProjectEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        println!();
        println!("Create your first world with:");
        println!("  loreweaver world \"Eldoria\" --type \"High Fantasy\"");
        return Ok(());
    }

    println!("{:<38} {:<10} {:<24} {:<20} {}", "ID", "Type", "Name", "Genre/Role", "Created");
    println!("{}", "-".repeat(104));

    for entry in entries {
        println!(
            "{:<38} {:<10} {:<24} {:<20} {}",
            entry.id,
            entry.kind(),
            entry.name,
            entry.secondary_label(),
            entry.created_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}

fn print_entry(entry: &ProjectEntry, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    println!("{} ({})", entry.name, entry.kind());
    println!("  ID:          {}", entry.id);
    println!("  Created:     {}", entry.created_at.format("%Y-%m-%d %H:%M:%S UTC"));

    match &entry.details {
        EntryDetails::World(w) => {
            println!("  World type:  {}", w.world_type);
            println!("  Key elements: {}", w.key_elements);
            println!("  Lore:        {}", w.lore_history);
        }
        EntryDetails::Character(c) => {
            println!("  Role:        {}", c.role);
            println!("  Motivation:  {}", c.motivation);
            println!("  Personality:");
            for t in Trait::ORDER {
                println!("    {:<20} {}", t.name(), c.personality.get(t));
            }
            println!("  Analysis:    {}", c.personality_analysis);
        }
    }

    Ok(())
}
