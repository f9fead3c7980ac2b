//! Player management commands.

use super::output::format_players_text;
use super::CliError;
use clap::Subcommand;
use geoquiz::ScoreFile;
use std::path::PathBuf;

/// What to do with the score file.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlayerAction {
    /// List players and their points
    List,
    /// Set a player's points back to zero
    Reset {
        /// Player name
        name: String,
    },
    /// Remove a player
    Delete {
        /// Player name
        name: String,
    },
}

/// Execute the players command.
///
/// # Errors
///
/// Returns an error if the score file cannot be read or written, or the
/// player does not exist.
pub(crate) fn execute(scores: PathBuf, action: Option<PlayerAction>) -> Result<(), CliError> {
    let mut file = ScoreFile::open(scores)?;

    match action.unwrap_or(PlayerAction::List) {
        PlayerAction::List => print!("{}", format_players_text(file.ledger())),
        PlayerAction::Reset { name } => {
            if !file.ledger_mut().reset_points(&name) {
                return Err(CliError::new(format!("no player named {name:?}")));
            }
            file.save()?;
            println!("Points of {name} reset to 0.");
        }
        PlayerAction::Delete { name } => {
            let Some(points) = file.ledger_mut().remove_player(&name) else {
                return Err(CliError::new(format!("no player named {name:?}")));
            };
            file.save()?;
            println!("Deleted {name} ({points} points).");
        }
    }

    Ok(())
}
