//! Wire types exchanged with the game API
//!
//! The API speaks Spanish; fields are renamed onto English Rust names here
//! and nowhere else. Every optional field the server may omit carries a
//! default so that older servers keep decoding.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    constants::{orbit, team, trajectory},
    game_type::GameType,
};

use super::Error;

fn default_scheme() -> String {
    team::DEFAULT_SCHEME.to_owned()
}

fn default_hints() -> u32 {
    team::DEFAULT_HINTS
}

fn default_time_limit() -> u32 {
    orbit::DEFAULT_TIME_LIMIT
}

fn default_lives() -> u32 {
    trajectory::DEFAULT_LIVES
}

fn default_hidden_name() -> String {
    "???".to_owned()
}

fn default_true() -> bool {
    true
}

/// Envelope wrapping every session returned by `GET /games/<type>`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Whether the server considers the response usable
    #[serde(default = "default_true")]
    pub success: bool,
    /// Wire name of the game type the server generated
    #[serde(default)]
    pub game_type: String,
    /// Identifier of today's session
    #[serde(default)]
    pub game_id: String,
    /// Date the session belongs to
    #[serde(rename = "fecha", default)]
    pub date: String,
    /// Variant-specific session data
    pub data: serde_json::Value,
    /// Optional server blurb describing the game
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

/// A player slot in a team line-up
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamPlayer {
    /// Position code (`PO`, `DC`, `ED`, ...)
    #[serde(rename = "posicion")]
    pub position: String,
    /// Given name
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    /// Surname, shown on the pitch once revealed
    #[serde(rename = "apellido", default)]
    pub surname: String,
    /// Full name, the identity the server reveals by
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    /// Relative or absolute photo path
    #[serde(default)]
    pub image_url: Option<String>,
    /// Nationality, used by hints
    #[serde(rename = "nacionalidad", default)]
    pub nationality: Option<String>,
    /// Appearances for the club
    #[serde(rename = "partidos", default)]
    pub appearances: Option<u32>,
}

/// Session data for both team games
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamPayload {
    /// Identifier of the session
    #[serde(default)]
    pub game_id: String,
    /// Date the session belongs to
    #[serde(rename = "fecha", default)]
    pub date: String,
    /// Tactical scheme, e.g. `3-4-3`
    #[serde(rename = "formacion", default = "default_scheme")]
    pub scheme: String,
    /// The line-up to guess
    #[serde(rename = "jugadores")]
    pub players: Vec<TeamPlayer>,
    /// Number of hints the player may use
    #[serde(rename = "pistas_disponibles", default = "default_hints")]
    pub hints: u32,
    /// Coach of the line-up
    #[serde(rename = "dt_nombre", default)]
    pub coach: Option<String>,
    /// Season the line-up played
    #[serde(rename = "temporada", default)]
    pub season: Option<String>,
    /// Competition the line-up played
    #[serde(rename = "competencia", default)]
    pub competition: Option<String>,
}

/// A player (or statistic) orbiting the coach
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrbitElement {
    /// Stable element identifier
    pub id: String,
    /// Element kind, `jugador` or `estadistica`
    #[serde(rename = "tipo", default)]
    pub kind: String,
    /// Name the server reveals by
    #[serde(rename = "nombre", default = "default_hidden_name")]
    pub name: String,
    /// Statistic value, when the element is a statistic
    #[serde(rename = "valor", default)]
    pub value: Option<String>,
    /// Relative or absolute photo path
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The coach at the centre of the orbit
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Protagonist {
    /// Coach name
    #[serde(rename = "nombre", default)]
    pub name: String,
    /// Relative or absolute photo path
    #[serde(default)]
    pub image_url: Option<String>,
    /// Coach nationality
    #[serde(rename = "nacionalidad", default)]
    pub nationality: Option<String>,
    /// Matches managed at the club
    #[serde(rename = "partidos_dirigidos", default)]
    pub matches_managed: Option<u32>,
}

/// Session data for the orbit game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrbitPayload {
    /// Identifier of the session
    #[serde(default)]
    pub game_id: String,
    /// Date the session belongs to
    #[serde(rename = "fecha", default)]
    pub date: String,
    /// The coach at the centre
    #[serde(rename = "protagonista", default)]
    pub protagonist: Protagonist,
    /// Elements to guess
    #[serde(rename = "elementos_orbitales")]
    pub elements: Vec<OrbitElement>,
    /// Ranking mode, e.g. `mas_goles`
    #[serde(rename = "modo_juego", default)]
    pub mode: String,
    /// Competition the ranking covers
    #[serde(rename = "competencia", default)]
    pub competition: String,
    /// Seconds available to finish
    #[serde(rename = "tiempo_limite", default = "default_time_limit")]
    pub time_limit: u32,
}

/// A club in the hidden player's trajectory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Club {
    /// Club name, hidden until revealed
    #[serde(rename = "nombre")]
    pub name: String,
    /// Country, always visible
    #[serde(rename = "pais", default)]
    pub country: String,
    /// Years at the club
    #[serde(rename = "periodo", default)]
    pub period: String,
    /// Relative or absolute crest path
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Player card disclosed by the server or at the end of a trajectory game
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerCard {
    /// Full name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Position code or label
    #[serde(rename = "posicion", default)]
    pub position: Option<String>,
    /// Nationality
    #[serde(rename = "nacionalidad", default)]
    pub nationality: Option<String>,
    /// Appearances for the club
    #[serde(rename = "partidos", default)]
    pub appearances: Option<u32>,
    /// Relative or absolute photo path
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Session data for the trajectory game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrajectoryPayload {
    /// Identifier of the session
    #[serde(default)]
    pub game_id: String,
    /// Date the session belongs to
    #[serde(rename = "fecha", default)]
    pub date: String,
    /// Clubs in the order they are revealed
    #[serde(rename = "clubes_internacionales")]
    pub clubs: Vec<Club>,
    /// The player to guess
    #[serde(rename = "jugador_oculto")]
    pub hidden_player: PlayerCard,
    /// Lives available
    #[serde(rename = "max_vidas", default = "default_lives")]
    pub max_lives: u32,
}

/// Decoded session data for any game type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPayload {
    /// National team line-up
    NationalTeam(TeamPayload),
    /// International team line-up
    InternationalTeam(TeamPayload),
    /// Orbit of the day
    Orbit(OrbitPayload),
    /// International trajectory
    Trajectory(TrajectoryPayload),
}

impl SessionPayload {
    /// Decodes the envelope's data as the payload of `game_type`
    ///
    /// The envelope's `game_id` fills in for payloads that omit their own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] if the server flagged the response as
    /// unsuccessful and [`Error::Decode`] if `data` has the wrong shape.
    pub fn from_envelope(game_type: GameType, envelope: Envelope) -> Result<Self, Error> {
        if !envelope.success {
            return Err(Error::Rejected(envelope.message.unwrap_or_default()));
        }
        let Envelope { game_id, data, .. } = envelope;
        let fill = |id: &mut String| {
            if id.is_empty() {
                id.clone_from(&game_id);
            }
        };
        Ok(match game_type {
            GameType::NationalTeam | GameType::InternationalTeam => {
                let mut payload: TeamPayload = serde_json::from_value(data)?;
                fill(&mut payload.game_id);
                if game_type == GameType::NationalTeam {
                    Self::NationalTeam(payload)
                } else {
                    Self::InternationalTeam(payload)
                }
            }
            GameType::Orbit => {
                let mut payload: OrbitPayload = serde_json::from_value(data)?;
                fill(&mut payload.game_id);
                Self::Orbit(payload)
            }
            GameType::InternationalTrajectory => {
                let mut payload: TrajectoryPayload = serde_json::from_value(data)?;
                fill(&mut payload.game_id);
                Self::Trajectory(payload)
            }
        })
    }

    /// The game type this payload belongs to
    pub fn game_type(&self) -> GameType {
        match self {
            Self::NationalTeam(_) => GameType::NationalTeam,
            Self::InternationalTeam(_) => GameType::InternationalTeam,
            Self::Orbit(_) => GameType::Orbit,
            Self::Trajectory(_) => GameType::InternationalTrajectory,
        }
    }

    /// The session identifier
    pub fn game_id(&self) -> &str {
        match self {
            Self::NationalTeam(p) | Self::InternationalTeam(p) => &p.game_id,
            Self::Orbit(p) => &p.game_id,
            Self::Trajectory(p) => &p.game_id,
        }
    }
}

/// Body of `POST /games/verify`
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRequest {
    /// Session the guess belongs to
    pub game_id: String,
    /// Game type of the session
    pub game_type: GameType,
    /// The guessed name
    #[serde(rename = "respuesta")]
    pub answer: String,
    /// Seconds played so far, sent by timed games only
    #[serde(rename = "tiempo_jugado")]
    pub elapsed_seconds: Option<u32>,
}

/// Response of `POST /games/verify`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyResult {
    /// Whether the guess was right
    #[serde(rename = "correcto")]
    pub correct: bool,
    /// Server message to show the player
    #[serde(rename = "mensaje", default)]
    pub message: String,
    /// Player disclosed by a correct guess
    #[serde(rename = "jugador_revelado", default)]
    pub revealed_player: Option<PlayerCard>,
    /// Names of elements disclosed by a correct guess
    #[serde(rename = "elementos_revelados", default)]
    pub revealed_elements: Option<Vec<String>>,
    /// New clue disclosed by a wrong guess
    #[serde(rename = "pista_nueva", default)]
    pub new_clue: Option<String>,
    /// Server-side game over flag
    #[serde(default)]
    pub game_over: bool,
    /// Server-side victory flag
    #[serde(rename = "victoria", default)]
    pub victory: bool,
}

/// Entry of `GET /games/list`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSummary {
    /// Wire name of the game type
    pub id: String,
    /// Display title
    #[serde(rename = "nombre")]
    pub name: String,
    /// Display description
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Endpoint serving the session
    #[serde(default)]
    pub endpoint: String,
}

/// Body of `GET /games/list`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GameList {
    pub games: Vec<GameSummary>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    fn team_envelope() -> serde_json::Value {
        json!({
            "success": true,
            "game_type": "equipo_nacional",
            "game_id": "equipo_nacional_20261016",
            "fecha": "2026-10-16",
            "data": {
                "game_id": "equipo_nacional_20261016",
                "fecha": "2026-10-16",
                "tipo": "equipo_nacional",
                "formacion": "3-4-3",
                "jugadores": [
                    {
                        "posicion": "PO",
                        "nombre": "Jorge",
                        "apellido": "Broun",
                        "nombre_completo": "Jorge Broun",
                        "image_url": "/api/v1/static/jugadores/jorge_broun.jpg",
                        "revelado": false,
                        "nacionalidad": null,
                        "partidos": null
                    }
                ],
                "pistas_disponibles": 3,
                "dt_nombre": "Miguel Ángel Russo",
                "temporada": "2023",
                "competencia": "Copa de la Liga"
            },
            "mensaje": "Adivina los 11 jugadores del equipo"
        })
    }

    #[test]
    fn test_team_envelope_decodes() {
        let envelope: Envelope = serde_json::from_value(team_envelope()).unwrap();
        let payload = SessionPayload::from_envelope(GameType::NationalTeam, envelope).unwrap();
        let SessionPayload::NationalTeam(team) = &payload else {
            panic!("expected national team payload");
        };
        assert_eq!(team.players.len(), 1);
        assert_eq!(team.players[0].full_name, "Jorge Broun");
        assert_eq!(team.coach.as_deref(), Some("Miguel Ángel Russo"));
        assert_eq!(payload.game_id(), "equipo_nacional_20261016");
        assert_eq!(payload.game_type(), GameType::NationalTeam);
    }

    #[test]
    fn test_missing_game_id_is_taken_from_envelope() {
        let envelope: Envelope = serde_json::from_value(json!({
            "game_id": "orbita_20261016",
            "data": {
                "elementos_orbitales": [{"id": "orbital_0", "tipo": "jugador", "nombre": "Marco Ruben"}],
                "modo_juego": "mas_goles",
                "competencia": "Liga Profesional 2015"
            }
        }))
        .unwrap();
        let payload = SessionPayload::from_envelope(GameType::Orbit, envelope).unwrap();
        let SessionPayload::Orbit(orbit) = payload else {
            panic!("expected orbit payload");
        };
        assert_eq!(orbit.game_id, "orbita_20261016");
        assert_eq!(orbit.time_limit, 120);
    }

    #[test]
    fn test_unsuccessful_envelope_is_rejected() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": false,
            "data": {},
            "mensaje": "sin datos"
        }))
        .unwrap();
        let err = SessionPayload::from_envelope(GameType::Orbit, envelope).unwrap_err();
        assert!(matches!(err, Error::Rejected(message) if message == "sin datos"));
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let envelope: Envelope = serde_json::from_value(json!({"data": {"jugadores": 3}})).unwrap();
        let err = SessionPayload::from_envelope(GameType::InternationalTeam, envelope).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_guess_request_skips_missing_elapsed() {
        let request = GuessRequest {
            game_id: "equipo_nacional_20261016".to_owned(),
            game_type: GameType::NationalTeam,
            answer: "Broun".to_owned(),
            elapsed_seconds: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "game_id": "equipo_nacional_20261016",
                "game_type": "equipo_nacional",
                "respuesta": "Broun"
            })
        );

        let timed = GuessRequest {
            elapsed_seconds: Some(42),
            game_type: GameType::Orbit,
            ..request
        };
        let body = serde_json::to_value(&timed).unwrap();
        assert_eq!(body["tiempo_jugado"], json!(42));
        assert_eq!(body["game_type"], json!("orbita"));
    }

    #[test]
    fn test_verify_result_defaults() {
        let result: VerifyResult = serde_json::from_value(json!({
            "correcto": true,
            "mensaje": "¡Correcto! Marco Ruben",
            "elementos_revelados": ["Marco Ruben"]
        }))
        .unwrap();
        assert!(result.correct);
        assert_eq!(result.revealed_elements, Some(vec!["Marco Ruben".to_owned()]));
        assert!(!result.victory);
        assert!(result.revealed_player.is_none());
    }
}
