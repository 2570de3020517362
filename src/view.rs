//! Text rendering of a game page

use std::fmt::{self, Write};

use crate::{
    api::ImageResolver,
    session::{Game, NoticeKind, Phase, Session},
};

fn notice_prefix(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "✅ ",
        NoticeKind::Failure => "❌ ",
        NoticeKind::Hint => "💡 ",
        NoticeKind::Info => "",
    }
}

fn controls(game: &Game) -> String {
    let mut controls = vec!["<nombre> adivinar".to_owned()];
    if let Some(hints) = game.hints() {
        controls.push(format!("/pista ({}/{})", hints.used(), hints.max()));
    }
    if game.rules().paid_reveal {
        controls.push("/club (-1 vida)".to_owned());
    }
    controls.push("/rendirse".to_owned());
    controls.push("/salir".to_owned());
    controls.join("  ")
}

fn render_into<W: Write>(session: &Session, images: &ImageResolver, out: &mut W) -> fmt::Result {
    match session.phase() {
        Phase::Loading => writeln!(out, "Cargando juego..."),
        Phase::LoadFailed(message) => {
            writeln!(out, "Error")?;
            writeln!(out, "{message}")?;
            writeln!(out, "/reintentar para volver a intentar, /salir para salir")
        }
        Phase::Playing(game) => {
            let details = game.details();
            writeln!(out, "== {} ==", details.title())?;
            details.render(game, images, out)?;
            if let Some(notice) = session.notice() {
                writeln!(out)?;
                writeln!(out, "{}{}", notice_prefix(notice.kind), notice.text)?;
            }
            if game.is_over() {
                writeln!(out, "Juego terminado. /salir para volver")
            } else {
                writeln!(out, "{}", controls(game))
            }
        }
    }
}

/// Renders the page for the current state of `session`
pub fn render(session: &Session, images: &ImageResolver) -> String {
    let mut out = String::new();
    render_into(session, images, &mut out).expect("writing to a String cannot fail");
    out
}
