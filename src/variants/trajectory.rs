//! International trajectory of the day
//!
//! One player is hidden behind the foreign clubs he played for. Only the
//! countries are shown at first; wrong guesses cost a life and uncover the
//! next club, and a life can also be spent on a club directly.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::{
    api::{ImageResolver, payload::TrajectoryPayload},
    session::{EndReason, Game, Item, Rules, Victory},
};

use super::{Setup, is_visible};

/// Page title
pub const TITLE: &str = "Trayectoria Internacional del Día";

const FULL_HEART: &str = "❤️";
const EMPTY_HEART: &str = "🖤";

/// Presentation data of a trajectory game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrajectoryDetails {
    date: String,
}

pub(super) fn setup(payload: TrajectoryPayload) -> Setup {
    let TrajectoryPayload {
        game_id,
        date,
        clubs,
        hidden_player,
        max_lives,
    } = payload;

    let items = clubs
        .into_iter()
        .enumerate()
        .map(|(index, club)| Item {
            id: index.to_string(),
            name: club.name,
            category: club.country,
            detail: Some(club.period).filter(|period| !period.is_empty()),
            image: club.logo_url,
        })
        .collect();

    Setup {
        game_id,
        rules: Rules {
            victory: Victory::TargetGuessed,
            lives: Some(max_lives),
            consolation_reveal: true,
            paid_reveal: true,
            ..Rules::reveal_all()
        },
        items,
        target: Some(hidden_player),
        details: TrajectoryDetails { date }.into(),
    }
}

/// Lives drawn as full and empty hearts
pub fn hearts(remaining: u32, max: u32) -> String {
    let full = remaining.min(max) as usize;
    let empty = max.saturating_sub(remaining) as usize;
    format!("{}{}", FULL_HEART.repeat(full), EMPTY_HEART.repeat(empty))
}

impl TrajectoryDetails {
    pub(super) fn end_text(&self, reason: EndReason, game: &Game) -> String {
        let name = game.shown_target().map_or("???", |card| card.name.as_str());
        match reason {
            EndReason::TargetGuessed | EndReason::AllRevealed => {
                format!("¡Felicitaciones! Adivinaste correctamente: {name}")
            }
            EndReason::Surrendered => format!("El jugador era: {name}"),
            EndReason::OutOfLives | EndReason::TimeExpired => {
                format!("Fin del juego. El jugador era: {name}")
            }
        }
    }

    pub(super) fn render<W: Write>(
        &self,
        game: &Game,
        images: &ImageResolver,
        out: &mut W,
    ) -> fmt::Result {
        writeln!(
            out,
            "Adivina el jugador por su trayectoria en clubes internacionales"
        )?;
        if !self.date.is_empty() {
            writeln!(out, "Fecha: {}", self.date)?;
        }
        if let Some(lives) = game.lives() {
            writeln!(out, "Vidas: {}", hearts(lives.remaining(), lives.max()))?;
        }

        if let Some(card) = game.shown_target() {
            writeln!(out, "Jugador: {}", card.name)?;
            if let Some(position) = &card.position {
                writeln!(out, "  Posición: {position}")?;
            }
            if let Some(nationality) = &card.nationality {
                writeln!(out, "  Nacionalidad: {nationality}")?;
            }
            if let Some(appearances) = card.appearances {
                writeln!(out, "  Partidos: {appearances}")?;
            }
            if let Some(url) = images.resolve_opt(card.image_url.as_deref()) {
                writeln!(out, "  {url}")?;
            }
        }

        writeln!(out, "Trayectoria de Clubes Internacionales")?;
        for (index, club) in game.board().items().iter().enumerate() {
            if is_visible(game, index) {
                write!(out, "  {} ({})", club.name, club.category)?;
                if let Some(period) = &club.detail {
                    write!(out, " {period}")?;
                }
                if let Some(url) = images.resolve_opt(club.image.as_deref()) {
                    write!(out, "  {url}")?;
                }
                writeln!(out)?;
            } else {
                writeln!(out, "  ? ({})", club.category)?;
            }
        }

        if !game.clues().is_empty() {
            writeln!(out, "Pistas")?;
            for clue in game.clues() {
                writeln!(out, "  - {clue}")?;
            }
        }
        Ok(())
    }
}
