//! Async runner binding a [`Session`] to a gateway and real timers
//!
//! The session never performs I/O. The driver executes the tickets and
//! alarms it hands out as tokio tasks and funnels every completion back
//! through one channel, so the session is only ever touched from the task
//! that owns the driver.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet};
use web_time::Duration;

use crate::{
    AlarmMessage,
    api::{self, Gateway, SessionPayload, VerifyResult},
    game_type::GameType,
    session::{FetchTicket, Generation, GuessTicket, Session},
};

/// A completion delivered back to the session
#[derive(Debug)]
pub enum Event {
    /// A fetch finished
    Loaded {
        /// Generation of the fetch
        generation: Generation,
        /// What the gateway returned
        result: Result<SessionPayload, api::Error>,
    },
    /// A verification finished
    Verified {
        /// Generation of the guess
        generation: Generation,
        /// What the gateway returned
        result: Result<VerifyResult, api::Error>,
    },
    /// A scheduled alarm fired
    Alarm(AlarmMessage),
}

/// Player actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a guess
    Guess(String),
    /// Use a hint
    Hint,
    /// Spend a life on the next club
    RevealClub,
    /// Give up
    Surrender,
    /// Retry a failed load
    Retry,
}

fn spawn_alarm(
    tasks: &mut JoinSet<()>,
    events: &mpsc::UnboundedSender<Event>,
    alarm: AlarmMessage,
    delay: Duration,
) {
    let events = events.clone();
    tasks.spawn(async move {
        tokio::time::sleep(delay).await;
        if events.send(Event::Alarm(alarm)).is_err() {
            tracing::debug!(?alarm, "alarm fired after the driver was dropped");
        }
    });
}

/// Runs one mounted game page
///
/// Dropping the driver aborts every outstanding request and timer.
pub struct Driver<G> {
    gateway: Arc<G>,
    session: Session,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    tasks: JoinSet<()>,
}

impl<G> std::fmt::Debug for Driver<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("session", &self.session)
            .field("pending_tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl<G: Gateway + 'static> Driver<G> {
    /// Mounts a page for `game_type` and starts loading it
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(gateway: Arc<G>, game_type: GameType) -> Self {
        let (session, ticket) = Session::mount(game_type);
        Self::with_session(gateway, session, ticket)
    }

    /// Drives an already mounted session, executing its first fetch
    pub fn with_session(gateway: Arc<G>, session: Session, ticket: FetchTicket) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut driver = Self {
            gateway,
            session,
            events_tx,
            events_rx,
            tasks: JoinSet::new(),
        };
        driver.fetch(ticket);
        driver
    }

    /// The driven session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The gateway requests go through
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn fetch(&mut self, ticket: FetchTicket) {
        tracing::debug!(game_type = %ticket.game_type, "fetching session");
        let gateway = Arc::clone(&self.gateway);
        let events = self.events_tx.clone();
        self.tasks.spawn(async move {
            let result = gateway.fetch_session(ticket.game_type).await;
            let event = Event::Loaded {
                generation: ticket.generation,
                result,
            };
            if events.send(event).is_err() {
                tracing::debug!("session arrived after the driver was dropped");
            }
        });
    }

    fn verify(&mut self, ticket: GuessTicket) {
        tracing::debug!(answer = %ticket.request.answer, "verifying guess");
        let gateway = Arc::clone(&self.gateway);
        let events = self.events_tx.clone();
        self.tasks.spawn(async move {
            let result = gateway.verify_guess(ticket.request).await;
            let event = Event::Verified {
                generation: ticket.generation,
                result,
            };
            if events.send(event).is_err() {
                tracing::debug!("verdict arrived after the driver was dropped");
            }
        });
    }

    /// Performs a player action
    ///
    /// Returns `false` if the session refused it.
    pub fn command(&mut self, command: Command) -> bool {
        match command {
            Command::Guess(input) => {
                let Some(ticket) = self.session.submit_guess(&input) else {
                    return false;
                };
                self.verify(ticket);
                true
            }
            Command::Retry => {
                let Some(ticket) = self.session.retry() else {
                    return false;
                };
                self.fetch(ticket);
                true
            }
            Command::Hint | Command::RevealClub | Command::Surrender => {
                let Self {
                    session,
                    tasks,
                    events_tx,
                    ..
                } = self;
                let schedule = |alarm, delay| spawn_alarm(tasks, events_tx, alarm, delay);
                match command {
                    Command::Hint => session.use_hint(schedule).is_some(),
                    Command::RevealClub => session.reveal_paid(schedule),
                    _ => session.surrender(),
                }
            }
        }
    }

    /// Waits for the next completion
    ///
    /// Yields `None` only if the event channel closed, which cannot happen
    /// while the driver holds its own sender.
    pub async fn next_event(&mut self) -> Option<Event> {
        while self.tasks.try_join_next().is_some() {}
        self.events_rx.recv().await
    }

    /// Feeds a completion to the session
    ///
    /// Returns `false` if the session discarded it as stale.
    pub fn apply(&mut self, event: Event) -> bool {
        let Self {
            session,
            tasks,
            events_tx,
            ..
        } = self;
        let schedule = |alarm, delay| spawn_alarm(tasks, events_tx, alarm, delay);

        match event {
            Event::Loaded { generation, result } => {
                session.receive_session(generation, result, schedule)
            }
            Event::Verified { generation, result } => {
                session.receive_verdict(generation, result, schedule)
            }
            Event::Alarm(alarm) => session.receive_alarm(alarm, schedule),
        }
    }

    /// Waits for the next completion and applies it
    pub async fn step(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Discards the page and cancels every outstanding task
    pub fn teardown(&mut self) {
        self.session.teardown();
        self.tasks.abort_all();
    }
}
