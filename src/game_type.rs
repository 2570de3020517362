//! Game type identification
//!
//! Every daily game belongs to one of four variants. The variant decides
//! which endpoint serves the session, how it is identified on the wire and
//! which rules the session plays by.

use std::{fmt::Display, str::FromStr};

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four daily game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum GameType {
    /// Guess the eleven Argentine players of a line-up
    #[serde(rename = "equipo_nacional")]
    NationalTeam,
    /// Guess the eleven foreign players of a line-up
    #[serde(rename = "equipo_internacional")]
    InternationalTeam,
    /// Guess the players orbiting a coach before the clock runs out
    #[serde(rename = "orbita")]
    Orbit,
    /// Guess a single player from his international club trajectory
    #[serde(rename = "trayectoria_internacional")]
    InternationalTrajectory,
}

impl GameType {
    /// All variants, in home-page order
    pub const ALL: [GameType; 4] = [
        GameType::NationalTeam,
        GameType::InternationalTeam,
        GameType::Orbit,
        GameType::InternationalTrajectory,
    ];

    /// Identifier used in request bodies and the games list
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::NationalTeam => "equipo_nacional",
            Self::InternationalTeam => "equipo_internacional",
            Self::Orbit => "orbita",
            Self::InternationalTrajectory => "trayectoria_internacional",
        }
    }

    /// Path segment under `/games/` that serves today's session
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::NationalTeam => "equipo-nacional",
            Self::InternationalTeam => "equipo-internacional",
            Self::Orbit => "orbita",
            Self::InternationalTrajectory => "trayectoria-internacional",
        }
    }
}

impl Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when a string names no known game
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown game type: {0}")]
pub struct UnknownGameType(pub String);

impl FromStr for GameType {
    type Err = UnknownGameType;

    /// Parses either the wire name (`equipo_nacional`) or the path segment
    /// (`equipo-nacional`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|game_type| game_type.wire_name() == normalized)
            .ok_or_else(|| UnknownGameType(s.to_owned()))
    }
}
