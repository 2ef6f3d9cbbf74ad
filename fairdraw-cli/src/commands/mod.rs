pub mod draw;
pub mod history;
pub mod lists;
pub mod share;
pub mod verify;

pub use draw::{handle_draw_command, DrawCommands};
pub use history::{handle_history_command, HistoryCommands};
pub use lists::{handle_list_command, ListCommands};
pub use share::share_draw;
pub use verify::{handle_verify_command, VerifyArgs};

use fairdraw_core::{DrawError, DrawRecord, DrawStore, Result, Storage};
use uuid::Uuid;

/// Resolve a draw ID or verification code to stored records, newest first.
pub(crate) fn resolve_records(storage: &Storage, code_or_id: &str) -> Result<Vec<DrawRecord>> {
    let draws = storage.draws();
    if let Ok(id) = Uuid::parse_str(code_or_id) {
        return Ok(vec![draws.get_draw(id)?]);
    }

    let records = draws.find_by_code(code_or_id)?;
    if records.is_empty() {
        return Err(DrawError::not_found(format!("draw '{}'", code_or_id)));
    }
    Ok(records)
}
