use crate::config::CliConfig;
use clap::{Args, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use fairdraw_core::algorithms::{
    BingoConfig, BingoVariant, NamesConfig, NumbersConfig, OrderConfig, TeamsConfig,
};
use fairdraw_core::codec;
use fairdraw_core::{
    DrawConfig, DrawError, DrawOutcome, DrawRecord, DrawResult, DrawStore, LotteryEngine, Result,
    Storage,
};
use serde_json::Value;

#[derive(Subcommand)]
pub enum DrawCommands {
    /// Pick winners from a list of names
    Names {
        #[command(flatten)]
        source: ItemSource,
        /// Number of winners
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        #[command(flatten)]
        options: DrawOptions,
    },
    /// Draw numbers from an inclusive range
    Numbers {
        /// Lowest number
        #[arg(long, allow_hyphen_values = true)]
        min: i64,
        /// Highest number
        #[arg(long, allow_hyphen_values = true)]
        max: i64,
        /// How many numbers to draw
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        /// Allow the same number more than once
        #[arg(long)]
        allow_repeats: bool,
        #[command(flatten)]
        options: DrawOptions,
    },
    /// Split players into teams
    Teams {
        #[command(flatten)]
        source: ItemSource,
        /// Number of teams
        #[arg(long, default_value_t = 2)]
        teams: usize,
        /// Fill teams in order instead of dealing round-robin
        #[arg(long)]
        unbalanced: bool,
        #[command(flatten)]
        options: DrawOptions,
    },
    /// Put items into a random running order
    Order {
        #[command(flatten)]
        source: ItemSource,
        #[command(flatten)]
        options: DrawOptions,
    },
    /// Call bingo balls
    Bingo {
        /// Ball set (75 or 90)
        #[arg(long = "type", default_value = "75")]
        variant: BingoVariant,
        /// Number of balls to call
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        #[command(flatten)]
        options: DrawOptions,
    },
}

#[derive(Args)]
pub struct ItemSource {
    /// Comma separated entries
    #[arg(short, long, value_delimiter = ',')]
    items: Vec<String>,
    /// Use a saved list instead of --items
    #[arg(short, long, conflicts_with = "items")]
    list: Option<String>,
}

#[derive(Args)]
pub struct DrawOptions {
    /// Title stored with the draw
    #[arg(short, long)]
    title: Option<String>,
    /// Print the full proof as JSON
    #[arg(long)]
    json: bool,
    /// Do not store the draw in history
    #[arg(long)]
    no_save: bool,
}

/// Entries for a draw plus the metadata naming where they came from.
struct Entries {
    items: Vec<String>,
    list: Option<(String, String)>,
}

impl ItemSource {
    fn resolve(self, storage: &Storage) -> Result<Entries> {
        if let Some(name) = self.list {
            let saved = storage.lists().load_list(&name)?;
            return Ok(Entries {
                items: saved.items,
                list: Some((saved.name, saved.id.to_string())),
            });
        }

        let items: Vec<String> = self
            .items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            return Err(DrawError::invalid_input("provide entries with --items or --list"));
        }

        Ok(Entries { items, list: None })
    }
}

pub fn handle_draw_command(
    cmd: DrawCommands,
    engine: &LotteryEngine,
    storage: &Storage,
    config: &CliConfig,
) -> Result<()> {
    let (mut draw, list, options) = match cmd {
        DrawCommands::Names {
            source,
            count,
            options,
        } => {
            let entries = source.resolve(storage)?;
            let draw: DrawConfig = NamesConfig::new(entries.items, count).into();
            (draw, entries.list, options)
        }
        DrawCommands::Numbers {
            min,
            max,
            count,
            allow_repeats,
            options,
        } => {
            let draw: DrawConfig = NumbersConfig::new(min, max, count, allow_repeats).into();
            (draw, None, options)
        }
        DrawCommands::Teams {
            source,
            teams,
            unbalanced,
            options,
        } => {
            let entries = source.resolve(storage)?;
            let draw: DrawConfig = TeamsConfig::new(entries.items, teams, !unbalanced).into();
            (draw, entries.list, options)
        }
        DrawCommands::Order { source, options } => {
            let entries = source.resolve(storage)?;
            let draw: DrawConfig = OrderConfig::new(entries.items).into();
            (draw, entries.list, options)
        }
        DrawCommands::Bingo {
            variant,
            count,
            options,
        } => {
            let draw: DrawConfig = BingoConfig::new(variant, count).into();
            (draw, None, options)
        }
    };

    let metadata = draw.metadata_mut();
    if let Some(title) = &options.title {
        metadata.insert("title".to_string(), Value::String(title.clone()));
    }
    if let Some((name, id)) = list {
        // The list ID is private and stripped before sealing
        metadata.insert("list".to_string(), Value::String(name));
        metadata.insert("_listId".to_string(), Value::String(id));
    }

    let outcome = engine.perform_draw(&draw)?;

    if options.json {
        println!("{}", outcome.proof.to_json_pretty()?);
    } else {
        print_outcome(&outcome, options.title.as_deref())?;
    }

    if config.auto_save && !options.no_save {
        let record = DrawRecord::from_proof(outcome.proof)?;
        storage.draws().save_draw(&record)?;
        tracing::debug!("Saved draw {} to history", record.id);
        if !options.json {
            println!("  Saved as: {}", record.id);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &DrawOutcome, title: Option<&str>) -> Result<()> {
    let proof = &outcome.proof;
    match title {
        Some(title) => println!("{} ({} draw)", title, proof.kind),
        None => println!("{} draw", proof.kind),
    }
    println!();

    match &outcome.result {
        DrawResult::Names(result) => {
            println!("Winners:");
            for (i, winner) in result.winners.iter().enumerate() {
                println!("  {}. {}", i + 1, winner);
            }
        }
        DrawResult::Numbers(result) => {
            let numbers: Vec<String> = result.numbers.iter().map(|n| n.to_string()).collect();
            println!("Numbers: {}", numbers.join(", "));
        }
        DrawResult::Teams(result) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Team", "Size", "Players"]);
            for team in &result.teams {
                table.add_row(vec![
                    team.name.clone(),
                    team.players.len().to_string(),
                    team.players.join(", "),
                ]);
            }
            println!("{}", table);
        }
        DrawResult::Order(result) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Position", "Entry"]);
            for placement in &result.order {
                table.add_row(vec![placement.position.to_string(), placement.item.clone()]);
            }
            println!("{}", table);
        }
        DrawResult::Bingo(result) => {
            let calls: Vec<String> = result.calls.iter().map(|c| c.to_string()).collect();
            println!("Calls ({}-ball): {}", result.variant, calls.join(", "));
        }
    }

    println!();
    println!("  Verification code: {}", codec::verification_code(proof)?);
    println!("  Drawn at: {}", proof.timestamp);
    println!("  Seed: {}", proof.seed);
    println!("  Hash: {}", proof.hash);
    Ok(())
}
