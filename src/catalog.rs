//! Home-page catalog of the daily games

use enum_map::{EnumMap, enum_map};
use serde::Serialize;

use crate::{
    api::{GameSummary, Gateway},
    game_type::GameType,
};

/// One game as listed on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// The game
    pub game_type: GameType,
    /// Display title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Client route of the game page
    pub route: String,
}

impl CatalogEntry {
    fn new(game_type: GameType, title: &str, description: &str) -> Self {
        Self {
            game_type,
            title: title.to_owned(),
            description: description.to_owned(),
            route: format!("/{}", game_type.path_segment()),
        }
    }
}

/// The games on offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: EnumMap<GameType, CatalogEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: enum_map! {
                GameType::NationalTeam => CatalogEntry::new(
                    GameType::NationalTeam,
                    "Equipo Nacional",
                    "Adivina los 11 jugadores argentinos del equipo del día",
                ),
                GameType::InternationalTeam => CatalogEntry::new(
                    GameType::InternationalTeam,
                    "Equipo Internacional",
                    "Descubre los jugadores internacionales que pasaron por Central",
                ),
                GameType::Orbit => CatalogEntry::new(
                    GameType::Orbit,
                    "Órbita del Día",
                    "Identifica los jugadores más destacados bajo un técnico canalla",
                ),
                GameType::InternationalTrajectory => CatalogEntry::new(
                    GameType::InternationalTrajectory,
                    "Trayectoria Internacional",
                    "Adivina el jugador por su trayectoria en clubes internacionales",
                ),
            },
        }
    }
}

impl Catalog {
    /// Entries in home-page order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        GameType::ALL.into_iter().map(|game_type| &self.entries[game_type])
    }

    /// Entry of one game
    pub fn entry(&self, game_type: GameType) -> &CatalogEntry {
        &self.entries[game_type]
    }

    /// Applies server titles and descriptions over the built-in ones
    ///
    /// Returns how many server entries were applied. Entries for unknown
    /// games are skipped.
    pub fn merge(&mut self, summaries: impl IntoIterator<Item = GameSummary>) -> usize {
        let mut applied = 0;
        for summary in summaries {
            let Ok(game_type) = summary.id.parse::<GameType>() else {
                tracing::warn!(id = %summary.id, "skipping unknown game in server list");
                continue;
            };
            let entry = &mut self.entries[game_type];
            if !summary.name.trim().is_empty() {
                entry.title = summary.name;
            }
            if !summary.description.trim().is_empty() {
                entry.description = summary.description;
            }
            applied += 1;
        }
        applied
    }

    /// Built-in catalog refreshed from the server list
    ///
    /// The built-in catalog is returned unchanged if the list cannot be
    /// fetched.
    pub async fn load<G: Gateway + ?Sized>(gateway: &G) -> Self {
        let mut catalog = Self::default();
        match gateway.list_games().await {
            Ok(summaries) => {
                let applied = catalog.merge(summaries);
                tracing::debug!(applied, "catalog merged with server list");
            }
            Err(e) => tracing::warn!("using built-in catalog: {e}"),
        }
        catalog
    }
}
