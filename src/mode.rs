//! Game mode selection.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Game mode - who plays O?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    /// The human plays X, the AI plays O.
    #[serde(rename = "pva")]
    PlayerVsAi,
}

impl GameMode {
    /// Returns display name.
    #[instrument]
    pub fn name(self) -> &'static str {
        match self {
            Self::PlayerVsPlayer => "Player vs Player",
            Self::PlayerVsAi => "Player vs AI",
        }
    }

    /// Toggles between the two modes.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::PlayerVsPlayer => Self::PlayerVsAi,
            Self::PlayerVsAi => Self::PlayerVsPlayer,
        }
    }

    /// True when O is played by the AI.
    pub fn has_ai(self) -> bool {
        self == Self::PlayerVsAi
    }
}
