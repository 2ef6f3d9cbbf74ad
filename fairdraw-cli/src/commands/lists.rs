use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use fairdraw_core::{DrawError, Result, Storage};

#[derive(Subcommand)]
pub enum ListCommands {
    /// Save a named list, replacing its entries if it exists
    Save {
        /// List name
        name: String,
        /// Comma separated entries
        #[arg(required = true, value_delimiter = ',')]
        items: Vec<String>,
    },
    /// Show the entries of a list
    Show {
        /// List name
        name: String,
    },
    /// List saved lists
    List,
    /// Delete a saved list
    Delete {
        /// List name
        name: String,
    },
}

pub fn handle_list_command(cmd: ListCommands, storage: &Storage) -> Result<()> {
    let lists = storage.lists();

    match cmd {
        ListCommands::Save { name, items } => {
            let saved = lists.save_list(&name, &items)?;
            println!("✓ Saved list '{}' with {} entries", saved.name, saved.items.len());
        }

        ListCommands::Show { name } => {
            let saved = lists.load_list(&name)?;
            println!("List '{}' ({} entries):", saved.name, saved.items.len());
            for item in &saved.items {
                println!("  - {}", item);
            }
            println!("  Updated: {}", saved.updated_at.format("%Y-%m-%d %H:%M:%S"));
        }

        ListCommands::List => {
            let saved = lists.list_lists()?;
            if saved.is_empty() {
                println!("No saved lists. Create one with 'fairdraw lists save NAME a,b,c'");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Name", "Entries", "Updated"]);
            for list in &saved {
                table.add_row(vec![
                    list.name.clone(),
                    list.items.len().to_string(),
                    list.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            println!("{}", table);
        }

        ListCommands::Delete { name } => {
            if !lists.delete_list(&name)? {
                return Err(DrawError::not_found(format!("list '{}'", name)));
            }
            println!("✓ Deleted list '{}'", name);
        }
    }

    Ok(())
}
