//! API gateway
//!
//! Translates game operations into HTTP round-trips. A failed call is
//! surfaced to the caller as an [`Error`]; nothing here retries.

pub mod http;
pub mod image;
pub mod payload;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpGateway;
pub use image::ImageResolver;
pub use payload::{GameSummary, GuessRequest, SessionPayload, VerifyResult};

use crate::game_type::GameType;

/// Errors a gateway call can end with
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (unreachable, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server answered {status}")]
    Status {
        /// The HTTP status received
        status: reqwest::StatusCode,
    },
    /// The body did not have the expected shape
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The server flagged the response as unsuccessful
    #[error("server rejected the request: {0}")]
    Rejected(String),
}

/// Operations the client needs from the game API
///
/// [`HttpGateway`] is the production implementation; tests substitute
/// in-memory doubles.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetches today's session for `game_type`
    async fn fetch_session(&self, game_type: GameType) -> Result<SessionPayload, Error>;

    /// Asks the server whether a guess is right
    async fn verify_guess(&self, request: GuessRequest) -> Result<VerifyResult, Error>;

    /// Lists the games the server offers
    async fn list_games(&self) -> Result<Vec<GameSummary>, Error>;

    /// Resolver for the image references found in payloads
    fn images(&self) -> &ImageResolver;

    /// Absolute URL for an image reference
    fn resolve_image_url(&self, path: &str) -> Option<String> {
        self.images().resolve(path)
    }
}
