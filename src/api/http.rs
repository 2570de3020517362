//! reqwest-backed gateway

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{config::ClientConfig, game_type::GameType};

use super::{
    Error, Gateway, ImageResolver,
    payload::{Envelope, GameList, GameSummary, GuessRequest, SessionPayload, VerifyResult},
};

/// Gateway talking to the real API over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: ClientConfig,
    images: ImageResolver,
}

impl HttpGateway {
    /// Creates a gateway for the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        let images = ImageResolver::from(&config);
        tracing::debug!(base_url = config.api_base_url(), "HTTP gateway initialized");
        Ok(Self {
            client,
            config,
            images,
        })
    }

    /// The configuration this gateway was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, Error> {
        let response = request.send().await.inspect_err(|e| {
            tracing::warn!("{what} failed to reach the API: {e}");
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{what} answered {status}");
            return Err(Error::Status { status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("{what} returned an unexpected body: {e}");
            Error::Decode(e)
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_session(&self, game_type: GameType) -> Result<SessionPayload, Error> {
        let url = self
            .config
            .endpoint(&format!("games/{}", game_type.path_segment()));
        tracing::debug!(%game_type, %url, "fetching session");

        let envelope: Envelope = self
            .read_json(self.client.get(&url), "session fetch")
            .await?;
        if !envelope.game_type.is_empty() && envelope.game_type != game_type.wire_name() {
            tracing::warn!(
                requested = %game_type,
                received = %envelope.game_type,
                "session type mismatch"
            );
        }
        SessionPayload::from_envelope(game_type, envelope)
    }

    async fn verify_guess(&self, request: GuessRequest) -> Result<VerifyResult, Error> {
        let url = self.config.endpoint("games/verify");
        tracing::debug!(game_id = %request.game_id, game_type = %request.game_type, "verifying guess");
        self.read_json(self.client.post(&url).json(&request), "guess verification")
            .await
    }

    async fn list_games(&self) -> Result<Vec<GameSummary>, Error> {
        let url = self.config.endpoint("games/list");
        let list: GameList = self.read_json(self.client.get(&url), "game list").await?;
        Ok(list.games)
    }

    fn images(&self) -> &ImageResolver {
        &self.images
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    use super::*;

    /// Serves a single canned response and reports the request line and body
    async fn serve_once(
        status: &'static str,
        body: String,
    ) -> (String, oneshot::Receiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break raw.len();
                }
                raw.extend_from_slice(&chunk[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while raw.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
            }
            let request_body = String::from_utf8_lossy(&raw[header_end..]).to_string();
            let request_line = head.lines().next().unwrap_or_default().to_owned();

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            tx.send((request_line, request_body)).ok();
        });

        (format!("http://{addr}/api/v1"), rx)
    }

    fn gateway_for(base_url: &str) -> HttpGateway {
        HttpGateway::new(ClientConfig::with_base_url(base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_session_hits_variant_endpoint() {
        let body = json!({
            "success": true,
            "game_type": "orbita",
            "game_id": "orbita_20261016",
            "fecha": "2026-10-16",
            "data": {
                "game_id": "orbita_20261016",
                "protagonista": {"nombre": "Ángel Tulio Zof"},
                "elementos_orbitales": [{"id": "orbital_0", "tipo": "jugador", "nombre": "Edgardo Bauza"}],
                "modo_juego": "mas_apariciones",
                "competencia": "Metropolitano 1980",
                "tiempo_limite": 90
            }
        })
        .to_string();
        let (base_url, seen) = serve_once("200 OK", body).await;

        let payload = gateway_for(&base_url)
            .fetch_session(GameType::Orbit)
            .await
            .unwrap();
        let SessionPayload::Orbit(orbit) = payload else {
            panic!("expected orbit payload");
        };
        assert_eq!(orbit.time_limit, 90);
        assert_eq!(orbit.protagonist.name, "Ángel Tulio Zof");

        let (request_line, _) = seen.await.unwrap();
        assert!(request_line.starts_with("GET /api/v1/games/orbita "));
    }

    #[tokio::test]
    async fn test_verify_guess_posts_spanish_body() {
        let body = json!({"correcto": false, "mensaje": "Incorrecto. Intenta de nuevo."}).to_string();
        let (base_url, seen) = serve_once("200 OK", body).await;

        let result = gateway_for(&base_url)
            .verify_guess(GuessRequest {
                game_id: "orbita_20261016".to_owned(),
                game_type: GameType::Orbit,
                answer: "Kily".to_owned(),
                elapsed_seconds: Some(15),
            })
            .await
            .unwrap();
        assert!(!result.correct);
        assert_eq!(result.message, "Incorrecto. Intenta de nuevo.");

        let (request_line, request_body) = seen.await.unwrap();
        assert!(request_line.starts_with("POST /api/v1/games/verify "));
        let sent: serde_json::Value = serde_json::from_str(&request_body).unwrap();
        assert_eq!(sent["respuesta"], json!("Kily"));
        assert_eq!(sent["tiempo_jugado"], json!(15));
    }

    #[tokio::test]
    async fn test_list_games_unwraps_games_field() {
        let body = json!({
            "games": [
                {"id": "equipo_nacional", "nombre": "Equipo Nacional del Día", "descripcion": "Adivina", "endpoint": "/api/v1/games/equipo-nacional"}
            ]
        })
        .to_string();
        let (base_url, _) = serve_once("200 OK", body).await;

        let games = gateway_for(&base_url).list_games().await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "equipo_nacional");
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let (base_url, _) =
            serve_once("500 Internal Server Error", json!({"detail": "boom"}).to_string()).await;

        let err = gateway_for(&base_url)
            .fetch_session(GameType::NationalTeam)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status } if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway_for(&format!("http://{addr}/api/v1"))
            .list_games()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_resolve_image_url_uses_api_origin() {
        let gateway = gateway_for("http://localhost:8000/api/v1");
        assert_eq!(
            gateway.resolve_image_url("/api/v1/static/tecnicos/zof.jpg"),
            Some("http://localhost:8000/api/v1/static/tecnicos/zof.jpg".to_owned())
        );
    }
}
