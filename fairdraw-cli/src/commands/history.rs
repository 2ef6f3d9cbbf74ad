use crate::commands::resolve_records;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Confirm;
use fairdraw_core::{DrawError, DrawRecord, DrawStore, Result, Storage};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recent draws
    List {
        /// Maximum number of draws to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show a stored draw and its proof
    Show {
        /// Verification code or draw ID
        code: String,
    },
    /// Find draws whose hash starts with a prefix
    Find {
        /// Hex prefix of the proof hash
        prefix: String,
    },
    /// Delete a stored draw
    Delete {
        /// Draw ID
        id: Uuid,
    },
    /// Delete every stored draw
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn handle_history_command(cmd: HistoryCommands, storage: &Storage) -> Result<()> {
    let draws = storage.draws();

    match cmd {
        HistoryCommands::List { limit } => {
            let records = draws.list_draws(limit)?;
            if records.is_empty() {
                println!("No draws stored yet.");
                return Ok(());
            }
            print_records(&records)?;
        }

        HistoryCommands::Show { code } => {
            for record in resolve_records(storage, &code)? {
                println!("Draw {}", record.id);
                println!("  Type: {}", record.kind);
                println!("  Verification code: {}", record.verification_code);
                println!("  Drawn at: {}", record.proof.timestamp);
                println!("  Result: {}", record.proof.draw_result()?);
                println!();
                println!("{}", record.proof.to_json_pretty()?);
            }
        }

        HistoryCommands::Find { prefix } => {
            let records = draws.find_by_hash_prefix(&prefix)?;
            if records.is_empty() {
                println!("No draws with hash starting '{}'", prefix);
                return Ok(());
            }
            print_records(&records)?;
        }

        HistoryCommands::Delete { id } => {
            if !draws.delete_draw(id)? {
                return Err(DrawError::not_found(format!("draw {}", id)));
            }
            println!("✓ Deleted draw {}", id);
        }

        HistoryCommands::Clear { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Delete every stored draw? This cannot be undone")
                    .default(false)
                    .interact()
                    .map_err(|e| DrawError::internal(format!("Prompt failed: {}", e)))?;

            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }

            let removed = draws.clear_draws()?;
            println!("✓ Deleted {} draws", removed);
        }
    }

    Ok(())
}

fn print_records(records: &[DrawRecord]) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Code", "Type", "Drawn at", "Result", "ID"]);

    for record in records {
        table.add_row(vec![
            record.verification_code.clone(),
            record.kind.to_string(),
            record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.proof.draw_result()?.summary(),
            record.id.to_string(),
        ]);
    }

    println!("{}", table);
    Ok(())
}
