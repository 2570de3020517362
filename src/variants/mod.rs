//! The four game variants
//!
//! Variants differ only in how a payload becomes a board and rules, in the
//! texts shown when a game ends and in how the board is drawn. The session
//! state machine itself is shared.

use std::fmt::{self, Write};

use crate::{
    api::{ImageResolver, SessionPayload, payload::PlayerCard},
    session::{EndReason, Game, Item, Rules},
};

pub mod international_team;
pub mod national_team;
pub mod orbit;
pub mod team;
pub mod trajectory;

pub use orbit::OrbitDetails;
pub use team::TeamDetails;
pub use trajectory::TrajectoryDetails;

/// Everything needed to start a game from a payload
#[derive(Debug, Clone)]
pub struct Setup {
    /// Server identifier of the session
    pub game_id: String,
    /// Rules of the variant
    pub rules: Rules,
    /// Items to reveal, in display order
    pub items: Vec<Item>,
    /// Hidden target, for single-target variants
    pub target: Option<PlayerCard>,
    /// Presentation data
    pub details: Details,
}

impl From<SessionPayload> for Setup {
    fn from(payload: SessionPayload) -> Self {
        match payload {
            SessionPayload::NationalTeam(payload) => national_team::setup(payload),
            SessionPayload::InternationalTeam(payload) => international_team::setup(payload),
            SessionPayload::Orbit(payload) => orbit::setup(payload),
            SessionPayload::Trajectory(payload) => trajectory::setup(payload),
        }
    }
}

/// Variant-specific presentation data
#[derive(Debug, Clone, derive_more::From)]
pub enum Details {
    /// National or international line-up
    Team(TeamDetails),
    /// Orbit of the day
    Orbit(OrbitDetails),
    /// International trajectory
    Trajectory(TrajectoryDetails),
}

impl Details {
    /// Title shown on the page header
    pub fn title(&self) -> &'static str {
        match self {
            Self::Team(details) => details.title(),
            Self::Orbit(_) => orbit::TITLE,
            Self::Trajectory(_) => trajectory::TITLE,
        }
    }

    /// Sticky text shown once `game` has ended for `reason`
    pub fn end_text(&self, reason: EndReason, game: &Game) -> String {
        match self {
            Self::Team(details) => details.end_text(reason, game),
            Self::Orbit(details) => details.end_text(reason, game),
            Self::Trajectory(details) => details.end_text(reason, game),
        }
    }

    /// Writes the variant's header lines and board
    ///
    /// # Errors
    ///
    /// Propagates errors of the underlying writer.
    pub fn render<W: Write>(
        &self,
        game: &Game,
        images: &ImageResolver,
        out: &mut W,
    ) -> fmt::Result {
        match self {
            Self::Team(details) => details.render(game, images, out),
            Self::Orbit(details) => details.render(game, images, out),
            Self::Trajectory(details) => details.render(game, images, out),
        }
    }
}

/// Whether an item's face may be shown
///
/// Everything is shown once the game is over.
pub(crate) fn is_visible(game: &Game, index: usize) -> bool {
    game.is_over() || game.board().is_revealed(index)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod fixtures {
    use crate::api::payload::{
        Club, OrbitElement, OrbitPayload, PlayerCard, Protagonist, TeamPayload, TeamPlayer,
        TrajectoryPayload,
    };

    pub(crate) const TEAM_NAMES: [(&str, &str, &str); 11] = [
        ("PO", "Jorge", "Broun"),
        ("DC", "Carlos", "Quintana"),
        ("ED", "Facundo", "Mallo"),
        ("EI", "Damián", "Martínez"),
        ("MC", "Kevin", "Ortiz"),
        ("MC", "Franco", "Ibarra"),
        ("MD", "Jaminton", "Campaz"),
        ("MI", "Ignacio", "Malcorra"),
        ("CT", "Marco", "Ruben"),
        ("CT", "Alejo", "Véliz"),
        ("CT", "Tomás", "O'Connor"),
    ];

    pub(crate) fn team(hints: u32) -> TeamPayload {
        TeamPayload {
            game_id: "equipo_nacional_20261016".to_owned(),
            date: "2026-10-16".to_owned(),
            scheme: "3-4-3".to_owned(),
            players: TEAM_NAMES
                .iter()
                .map(|(position, first, last)| TeamPlayer {
                    position: (*position).to_owned(),
                    first_name: (*first).to_owned(),
                    surname: (*last).to_owned(),
                    full_name: format!("{first} {last}"),
                    image_url: Some(format!("/static/jugadores/{}.jpg", last.to_lowercase())),
                    nationality: None,
                    appearances: None,
                })
                .collect(),
            hints,
            coach: Some("Miguel Ángel Russo".to_owned()),
            season: Some("2023".to_owned()),
            competition: Some("Copa de la Liga".to_owned()),
        }
    }

    pub(crate) fn orbit(names: &[&str], time_limit: u32) -> OrbitPayload {
        OrbitPayload {
            game_id: "orbita_20261016".to_owned(),
            date: "2026-10-16".to_owned(),
            protagonist: Protagonist {
                name: "Miguel Ángel Russo".to_owned(),
                image_url: None,
                nationality: Some("Argentina".to_owned()),
                matches_managed: Some(250),
            },
            elements: names
                .iter()
                .enumerate()
                .map(|(i, name)| OrbitElement {
                    id: format!("e{i}"),
                    kind: "jugador".to_owned(),
                    name: (*name).to_owned(),
                    value: Some(format!("{} goles", 10 - i)),
                    image_url: None,
                })
                .collect(),
            mode: "mas_goles".to_owned(),
            competition: "Liga Profesional".to_owned(),
            time_limit,
        }
    }

    pub(crate) fn trajectory(max_lives: u32) -> TrajectoryPayload {
        let club = |name: &str, country: &str, period: &str| Club {
            name: name.to_owned(),
            country: country.to_owned(),
            period: period.to_owned(),
            logo_url: None,
        };
        TrajectoryPayload {
            game_id: "trayectoria_internacional_20261016".to_owned(),
            date: "2026-10-16".to_owned(),
            clubs: vec![
                club("Olympique de Marseille", "Francia", "2003-2004"),
                club("Villarreal", "España", "2004-2006"),
                club("Al-Jazira", "Emiratos Árabes", "2007-2008"),
            ],
            hidden_player: PlayerCard {
                name: "Marco Ruben".to_owned(),
                position: Some("CT".to_owned()),
                nationality: Some("Argentina".to_owned()),
                appearances: Some(300),
                image_url: Some("/static/jugadores/ruben.jpg".to_owned()),
            },
            max_lives,
        }
    }
}
