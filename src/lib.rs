//! # Carcio Game Client Library
//!
//! This library provides the client side of the Carcio daily football
//! trivia games. It fetches the day's sessions from the game API, tracks
//! every guess, hint, life and countdown locally, and renders the state of
//! each game page.
//!
//! The [`session`] state machine performs no I/O: it returns tickets for
//! the requests it needs and asks for [`AlarmMessage`]s to be scheduled.
//! The [`driver`] executes those against an [`api::Gateway`] on tokio.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]
use serde::{Deserialize, Serialize};

pub mod api;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod driver;
pub mod formation;
pub mod game_type;
pub mod session;
pub mod variants;
pub mod view;

use session::{Generation, NoticeId};

/// Alarm messages for timed events of a game page
///
/// The session asks for these to be delivered after a delay. Each carries
/// the generation that scheduled it, so alarms outliving their page are
/// ignored when they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Clear a transient notice
    ClearNotice {
        /// Generation that posted the notice
        generation: Generation,
        /// The notice to clear
        notice: NoticeId,
    },
    /// Advance the countdown by one second
    Tick {
        /// Generation that started the countdown
        generation: Generation,
    },
}
