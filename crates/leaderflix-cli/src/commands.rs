use thiserror::Error;

use leaderflix_core::{FavoriteItem, ItemId};
use leaderflix_sync::{FavoritesError, FavoritesGateway, ToggleOutcome};

use crate::state::AppState;

pub const USAGE: &str = "usage: leaderflix <list | remove <video_id> | clear>";

/// A favorites action requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Remove(ItemId),
    Clear,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        match args {
            [cmd] if cmd == "list" => Ok(Command::List),
            [cmd] if cmd == "clear" => Ok(Command::Clear),
            [cmd, id] if cmd == "remove" => id
                .parse::<u64>()
                .map(|id| Command::Remove(ItemId(id)))
                .map_err(|_| CommandError::Usage(format!("invalid video id: {}", id))),
            [] => Err(CommandError::Usage("missing command".to_string())),
            _ => Err(CommandError::Usage(format!(
                "unrecognized arguments: {}",
                args.join(" ")
            ))),
        }
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error("{0} is not a favorite")]
    NotFavorite(ItemId),

    #[error("{0} was no longer a favorite and has been added back")]
    ReAdded(ItemId),

    #[error(transparent)]
    Favorites(#[from] FavoritesError),
}

/// Load the session's favorites, then carry out the command.
/// Returns the lines to print.
pub async fn run<G: FavoritesGateway>(
    state: &AppState<G>,
    command: Command,
) -> Result<Vec<String>, CommandError> {
    let session = state.session.as_ref();
    let items = state.favorites.load(session).await?;

    match command {
        Command::List => {
            let mut lines: Vec<String> = items.iter().map(format_item).collect();
            lines.push(format!("{} favorites", items.len()));
            Ok(lines)
        }
        Command::Remove(item_id) => {
            let item = items
                .into_iter()
                .find(|i| i.item_id == item_id)
                .ok_or(CommandError::NotFavorite(item_id))?;

            let outcome = state.favorites.toggle(session, item).await?;
            removal_result(item_id, outcome)
        }
        Command::Clear => {
            let result = state.favorites.clear_all(session).await?;
            Ok(vec![format!("Removed {} favorites", result.removed.len())])
        }
    }
}

/// A remove that ended up adding means another load dropped the item first.
fn removal_result(item_id: ItemId, outcome: ToggleOutcome) -> Result<Vec<String>, CommandError> {
    match outcome {
        ToggleOutcome::Removed => Ok(vec![format!("Removed {}", item_id)]),
        ToggleOutcome::Added => Err(CommandError::ReAdded(item_id)),
    }
}

fn format_item(item: &FavoriteItem) -> String {
    format!(
        "{}\t{}s\t{}\t{}",
        item.item_id, item.duration_seconds, item.owner_display_name, item.stream_url
    )
}
