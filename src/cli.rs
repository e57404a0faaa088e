//! Command-line interface for strictly_tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use strictly_tictactoe::GameMode;

/// Strictly Tic-Tac-Toe - play against a friend or a heuristic AI
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Tic-tac-toe with a heuristic AI and persistent scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "strictly_tictactoe.toml")]
    pub config: std::path::PathBuf,

    /// Path to the database file (overrides the config file)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Starting mode (overrides the config file)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Delay before the AI answers, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// Seed for the AI's random tie-breaks
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print scores and game statistics
    Stats,

    /// Zero the score tally
    ResetScores,

    /// Delete the recorded game history
    ClearHistory,
}

/// Game mode as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Player vs player
    Pvp,
    /// Player vs AI
    Pva,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
            ModeArg::Pva => GameMode::PlayerVsAi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_overrides() {
        let cli = Cli::try_parse_from([
            "strictly_tictactoe",
            "play",
            "--mode",
            "pva",
            "--seed",
            "9",
            "--db-path",
            "scores.db",
        ])
        .unwrap();
        assert_eq!(cli.db_path.as_deref(), Some("scores.db"));
        match cli.command {
            Command::Play { mode, seed, ai_delay_ms } => {
                assert_eq!(mode.map(GameMode::from), Some(GameMode::PlayerVsAi));
                assert_eq!(seed, Some(9));
                assert_eq!(ai_delay_ms, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_stats() {
        let cli = Cli::try_parse_from(["strictly_tictactoe", "stats"]).unwrap();
        assert!(matches!(cli.command, Command::Stats));
        assert_eq!(cli.config, std::path::PathBuf::from("strictly_tictactoe.toml"));
    }
}
