//! Orbit of the day
//!
//! A coach sits in the middle; the players who orbit him under the day's
//! criterion must be named before the countdown runs out.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::{
    api::{
        ImageResolver,
        payload::{OrbitPayload, Protagonist},
    },
    constants::orbit::DANGER_THRESHOLD,
    session::{EndReason, Game, Item, RevealCause, Rules, rules::format_clock},
};

use super::{Setup, is_visible};

/// Page title
pub const TITLE: &str = "Órbita del Día";

/// Human description of a ranking criterion
pub fn mode_label(mode: &str) -> &str {
    match mode {
        "mas_minutos" => "más minutos jugados",
        "mas_goles" => "más goles",
        "mas_apariciones" => "más apariciones",
        other => other,
    }
}

/// Presentation data of an orbit game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrbitDetails {
    date: String,
    protagonist: Protagonist,
    mode: String,
    competition: String,
}

pub(super) fn setup(payload: OrbitPayload) -> Setup {
    let OrbitPayload {
        game_id,
        date,
        protagonist,
        elements,
        mode,
        competition,
        time_limit,
    } = payload;

    let items = elements
        .into_iter()
        .map(|element| Item {
            id: element.id,
            name: element.name,
            category: element.kind,
            detail: element.value,
            image: element.image_url,
        })
        .collect();

    Setup {
        game_id,
        rules: Rules {
            time_limit: Some(time_limit),
            ..Rules::reveal_all()
        },
        items,
        target: None,
        details: OrbitDetails {
            date,
            protagonist,
            mode,
            competition,
        }
        .into(),
    }
}

impl OrbitDetails {
    /// The coach in the middle of the orbit
    pub fn protagonist(&self) -> &Protagonist {
        &self.protagonist
    }

    /// Subtitle describing the day's criterion
    pub fn subtitle(&self) -> String {
        format!(
            "Jugadores con {} en {}",
            mode_label(&self.mode),
            self.competition
        )
    }

    pub(super) fn end_text(&self, reason: EndReason, game: &Game) -> String {
        let board = game.board();
        let guessed = board.revealed_by(RevealCause::Guess);
        match reason {
            EndReason::AllRevealed => {
                let elapsed = game.clock().map_or(0, |clock| clock.elapsed());
                format!(
                    "¡Felicitaciones! Adivinaste todos los jugadores en {}",
                    format_clock(elapsed)
                )
            }
            EndReason::TimeExpired => format!(
                "¡Se acabó el tiempo! Adivinaste {guessed} de {} jugadores",
                board.total()
            ),
            EndReason::Surrendered => "Te rendiste. Aquí están todos los jugadores.".to_owned(),
            EndReason::TargetGuessed | EndReason::OutOfLives => format!(
                "Fin del juego. Adivinaste {guessed} de {} jugadores",
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
        writeln!(out, "{}", self.subtitle())?;
        if !self.date.is_empty() {
            writeln!(out, "Fecha: {}", self.date)?;
        }
        if let Some(clock) = game.clock() {
            write!(out, "Tiempo: {}", format_clock(clock.remaining()))?;
            if !game.is_over() && clock.remaining() < DANGER_THRESHOLD {
                write!(out, " (!)")?;
            }
            write!(out, "   ")?;
        }
        writeln!(
            out,
            "Progreso: {} / {}",
            board.revealed_count(),
            board.total()
        )?;

        write!(out, "Director Técnico: {}", self.protagonist.name)?;
        if let Some(url) = images.resolve_opt(self.protagonist.image_url.as_deref()) {
            write!(out, "  {url}")?;
        }
        writeln!(out)?;

        for (index, item) in board.items().iter().enumerate() {
            if is_visible(game, index) {
                write!(out, "  {}", item.name)?;
                if let Some(value) = &item.detail {
                    write!(out, " ({value})")?;
                }
                if let Some(url) = images.resolve_opt(item.image.as_deref()) {
                    write!(out, "  {url}")?;
                }
                writeln!(out)?;
            } else {
                writeln!(out, "  ???")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{
        api::SessionPayload,
        variants::{Details, fixtures},
    };

    #[test]
    fn test_mode_labels() {
        assert_eq!(mode_label("mas_minutos"), "más minutos jugados");
        assert_eq!(mode_label("mas_goles"), "más goles");
        assert_eq!(mode_label("mas_apariciones"), "más apariciones");
        assert_eq!(mode_label("otro"), "otro");
    }

    #[test]
    fn test_setup_is_timed() {
        let setup = Setup::from(SessionPayload::Orbit(fixtures::orbit(
            &["Marco Ruben", "Ignacio Malcorra"],
            120,
        )));
        assert_eq!(setup.rules.time_limit, Some(120));
        assert_eq!(setup.rules.hints, None);
        assert_eq!(setup.items[1].id, "e1");
        assert_eq!(setup.items[1].detail.as_deref(), Some("9 goles"));
        let Details::Orbit(details) = &setup.details else {
            panic!("expected orbit details");
        };
        assert_eq!(details.subtitle(), "Jugadores con más goles en Liga Profesional");
        assert_eq!(details.protagonist().name, "Miguel Ángel Russo");
    }
}
