//! Line-up games shared by the national and international variants
//!
//! Eleven players are hidden on a pitch. Each correct guess reveals one of
//! them; the game is won when the whole line-up is revealed.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::{
    api::{ImageResolver, payload::TeamPayload},
    formation::{self, Scheme},
    session::{EndReason, Game, Item, Rules, RevealCause},
};

use super::{Setup, is_visible};

/// Presentation data of a line-up game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDetails {
    national: bool,
    date: String,
    scheme: Scheme,
    surnames: Vec<String>,
    coach: Option<String>,
    season: Option<String>,
    competition: Option<String>,
}

pub(super) fn setup(payload: TeamPayload, rules: Rules, national: bool) -> Setup {
    let TeamPayload {
        game_id,
        date,
        scheme,
        players,
        coach,
        season,
        competition,
        ..
    } = payload;

    let scheme = scheme.parse::<Scheme>().unwrap_or_else(|e| {
        tracing::warn!(game_id = %game_id, error = %e, "unreadable scheme, using the default");
        Scheme::default()
    });
    let surnames = players
        .iter()
        .map(|player| {
            if player.surname.is_empty() {
                player.full_name.clone()
            } else {
                player.surname.clone()
            }
        })
        .collect();
    let items = players
        .into_iter()
        .map(|player| Item {
            id: player.full_name.clone(),
            name: player.full_name,
            category: player.position,
            detail: player.nationality,
            image: player.image_url,
        })
        .collect();

    Setup {
        game_id,
        rules,
        items,
        target: None,
        details: TeamDetails {
            national,
            date,
            scheme,
            surnames,
            coach,
            season,
            competition,
        }
        .into(),
    }
}

impl TeamDetails {
    /// Page title
    pub fn title(&self) -> &'static str {
        if self.national {
            "Equipo Nacional del Día"
        } else {
            "Equipo Internacional del Día"
        }
    }

    /// Scheme the line-up plays, such as `3-4-3`
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Surname shown on a revealed slot
    pub fn surname(&self, index: usize) -> Option<&str> {
        self.surnames.get(index).map(String::as_str)
    }

    pub(super) fn end_text(&self, reason: EndReason, game: &Game) -> String {
        let board = game.board();
        match reason {
            EndReason::AllRevealed => "¡Felicitaciones! Completaste el equipo".to_owned(),
            EndReason::Surrendered => "Te rendiste. Aquí está el equipo completo.".to_owned(),
            EndReason::TargetGuessed | EndReason::OutOfLives | EndReason::TimeExpired => format!(
                "Juego terminado. Adivinaste {} de {} jugadores",
                board.revealed_by(RevealCause::Guess),
                board.total()
            ),
        }
    }

    pub(super) fn render<W: Write>(
        &self,
        game: &Game,
        images: &ImageResolver,
        out: &mut W,
    ) -> fmt::Result {
        let board = game.board();
        let context: Vec<&str> = [&self.coach, &self.season, &self.competition]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect();
        if !context.is_empty() {
            writeln!(out, "{}", context.join(" · "))?;
        }
        if !self.date.is_empty() {
            writeln!(out, "Fecha: {}", self.date)?;
        }
        write!(
            out,
            "Progreso: {} / {}",
            board.revealed_count(),
            board.total()
        )?;
        if let Some(hints) = game.hints() {
            write!(out, "   Pistas: {} / {}", hints.used(), hints.max())?;
        }
        writeln!(out)?;
        writeln!(out, "ESQUEMA = {}", self.scheme)?;

        let lineup = formation::arrange(board.items().iter().enumerate(), |(_, item)| {
            item.category.as_str()
        });
        for (line, slots) in lineup.top_down() {
            let label = format!("{} ({})", line.label(), self.scheme.line_size(line));
            self.render_line(game, images, &label, slots, out)?;
        }
        if !lineup.unplaced().is_empty() {
            self.render_line(game, images, "Otros", lineup.unplaced(), out)?;
        }
        Ok(())
    }

    fn render_line<W: Write>(
        &self,
        game: &Game,
        images: &ImageResolver,
        label: &str,
        slots: &[(usize, &Item)],
        out: &mut W,
    ) -> fmt::Result {
        if slots.is_empty() {
            return Ok(());
        }
        writeln!(out, "{label}")?;
        for &(index, item) in slots {
            if is_visible(game, index) {
                let name = self.surname(index).unwrap_or(&item.name);
                write!(out, "  {:<3} {name}", item.category)?;
                if let Some(url) = images.resolve_opt(item.image.as_deref()) {
                    write!(out, "  {url}")?;
                }
                writeln!(out)?;
            } else {
                writeln!(out, "  {:<3} ???", item.category)?;
            }
        }
        Ok(())
    }
}
