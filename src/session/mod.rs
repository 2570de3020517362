//! Client-side game session state machine
//!
//! One [`Session`] exists per mounted game page. It moves from `Loading` to
//! an active game and from there to exactly one terminal state. Network
//! round-trips and delayed alarms are not performed here: the session hands
//! out tickets and alarm messages, and the caller feeds the completions back
//! in. Every ticket and alarm carries the [`Generation`] that issued it so
//! that completions belonging to a retried or torn-down mount are dropped.

pub mod board;
pub mod notice;
pub mod rules;

use garde::Validate;
use serde::{Deserialize, Serialize};
use web_time::Duration;

pub use board::{Board, Item, RevealCause};
pub use notice::{Notice, NoticeId, NoticeKind};
pub use rules::{CountdownClock, HintBudget, LivesCounter, Rules, Victory};

use crate::{
    AlarmMessage,
    api::{self, GuessRequest, SessionPayload, VerifyResult, payload::PlayerCard},
    constants::{guess::MAX_LENGTH, team::DEFAULT_NATIONALITY, timing::TICK},
    game_type::GameType,
    variants::{Details, Setup},
};

/// Shown when today's session cannot be loaded
pub const LOAD_FAILED_TEXT: &str = "Error al cargar el juego. Intenta más tarde.";
/// Shown when a guess cannot be checked
pub const VERIFY_FAILED_TEXT: &str = "Error al verificar la respuesta";

/// Token identifying one live mount of a session
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Whether a game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Accepting guesses
    Active,
    /// Finished with a victory
    Won,
    /// Finished with a defeat or surrender
    Lost,
}

/// Why a game finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// Every item was revealed by guesses
    AllRevealed,
    /// The hidden target was guessed
    TargetGuessed,
    /// No life left
    OutOfLives,
    /// The countdown reached zero
    TimeExpired,
    /// The player gave up
    Surrendered,
}

impl EndReason {
    /// Terminal status this reason leads to
    pub fn status(self) -> Status {
        match self {
            Self::AllRevealed | Self::TargetGuessed => Status::Won,
            Self::OutOfLives | Self::TimeExpired | Self::Surrendered => Status::Lost,
        }
    }
}

/// Request to fetch today's session, issued on mount and retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Generation the result must be reported with
    pub generation: Generation,
    /// Game to fetch
    pub game_type: GameType,
}

/// Request to verify a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessTicket {
    /// Generation the result must be reported with
    pub generation: Generation,
    /// Body to send
    pub request: GuessRequest,
}

/// A disclosed hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// Board index of the hinted item
    pub index: usize,
    /// Category (position) of the item
    pub category: String,
    /// Nationality or other secondary fact
    pub detail: String,
}

#[derive(Debug, Validate)]
struct Guess {
    #[garde(length(chars, min = 1, max = MAX_LENGTH))]
    answer: String,
}

/// Where the page is in its lifecycle
#[derive(Debug)]
pub enum Phase {
    /// Waiting for today's session
    Loading,
    /// The session could not be loaded; a retry is possible
    LoadFailed(String),
    /// A game is being played or has finished
    Playing(Box<Game>),
}

/// What applying a server verdict produced
struct Outcome {
    kind: NoticeKind,
    text: String,
    end: Option<EndReason>,
}

/// State of a loaded game
#[derive(Debug)]
pub struct Game {
    game_id: String,
    game_type: GameType,
    rules: Rules,
    board: Board,
    target: Option<PlayerCard>,
    target_shown: bool,
    status: Status,
    end_reason: Option<EndReason>,
    hints: Option<HintBudget>,
    lives: Option<LivesCounter>,
    clock: Option<CountdownClock>,
    clues: Vec<String>,
    details: Details,
}

impl Game {
    fn new(game_type: GameType, setup: Setup) -> Self {
        let Setup {
            game_id,
            rules,
            items,
            target,
            details,
        } = setup;
        Self {
            game_id,
            game_type,
            board: Board::new(items),
            target,
            target_shown: false,
            status: Status::Active,
            end_reason: None,
            hints: rules.hints.map(HintBudget::new),
            lives: rules.lives.map(LivesCounter::new),
            clock: rules.time_limit.map(CountdownClock::new),
            clues: Vec::new(),
            details,
            rules,
        }
    }

    /// Server identifier of the session
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Game type of the session
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Rules the session plays by
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Items and their reveal state
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The hidden target, once it may be shown
    pub fn shown_target(&self) -> Option<&PlayerCard> {
        self.target.as_ref().filter(|_| self.target_shown)
    }

    /// Current status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the game has reached a terminal state
    pub fn is_over(&self) -> bool {
        self.status != Status::Active
    }

    /// Why the game ended, if it did
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Hint budget, for variants with hints
    pub fn hints(&self) -> Option<&HintBudget> {
        self.hints.as_ref()
    }

    /// Lives, for variants with lives
    pub fn lives(&self) -> Option<&LivesCounter> {
        self.lives.as_ref()
    }

    /// Countdown, for timed variants
    pub fn clock(&self) -> Option<&CountdownClock> {
        self.clock.as_ref()
    }

    /// Clues collected from wrong guesses
    pub fn clues(&self) -> &[String] {
        &self.clues
    }

    /// Variant-specific presentation data
    pub fn details(&self) -> &Details {
        &self.details
    }

    fn finish(&mut self, reason: EndReason) -> bool {
        if self.is_over() {
            return false;
        }
        self.status = reason.status();
        self.end_reason = Some(reason);
        if reason == EndReason::Surrendered {
            self.board.reveal_all(RevealCause::Surrender);
        }
        self.target_shown = self.target.is_some();
        true
    }

    fn add_clue(&mut self, clue: &str) {
        let clue = clue.trim();
        if !clue.is_empty() && !self.clues.iter().any(|known| known == clue) {
            self.clues.push(clue.to_owned());
        }
    }

    fn apply_verdict(&mut self, verdict: VerifyResult) -> Outcome {
        if let Some(clue) = verdict.new_clue.as_deref() {
            self.add_clue(clue);
        }

        if self.rules.victory == Victory::TargetGuessed && (verdict.correct || verdict.victory) {
            if let Some(card) = verdict.revealed_player {
                let known = self.target.take().unwrap_or_default();
                self.target = Some(PlayerCard {
                    position: card.position.or(known.position),
                    nationality: card.nationality.or(known.nationality),
                    appearances: card.appearances.or(known.appearances),
                    image_url: card.image_url.or(known.image_url),
                    name: card.name,
                });
            }
            return Outcome {
                kind: NoticeKind::Success,
                text: verdict.message,
                end: Some(EndReason::TargetGuessed),
            };
        }

        if verdict.correct {
            return self.apply_correct(verdict);
        }

        let mut end = None;
        if let Some(lives) = self.lives.as_mut() {
            lives.lose();
            if self.rules.consolation_reveal {
                self.board.reveal_next(RevealCause::Consolation);
            }
            if lives.is_exhausted() {
                end = Some(EndReason::OutOfLives);
            }
        }
        if self.rules.victory == Victory::TargetGuessed && verdict.game_over {
            end = Some(EndReason::OutOfLives);
        }
        let text = if verdict.message.is_empty() {
            "Incorrecto".to_owned()
        } else {
            verdict.message
        };
        Outcome {
            kind: NoticeKind::Failure,
            text,
            end,
        }
    }

    fn apply_correct(&mut self, verdict: VerifyResult) -> Outcome {
        let names = verdict
            .revealed_elements
            .unwrap_or_default()
            .into_iter()
            .chain(verdict.revealed_player.map(|card| card.name));

        let mut newly = 0;
        let mut repeated = None;
        for name in names {
            match self.board.find(&name) {
                Some(index) if self.board.reveal(index, RevealCause::Guess) => newly += 1,
                Some(_) => repeated = Some(name),
                None => tracing::warn!(game_id = %self.game_id, %name, "server revealed an unknown item"),
            }
        }

        let end = (self.rules.victory == Victory::AllRevealed && self.board.all_revealed())
            .then_some(EndReason::AllRevealed);

        match repeated {
            Some(name) if newly == 0 => Outcome {
                kind: NoticeKind::Info,
                text: format!("Ya revelaste a {name}"),
                end,
            },
            _ => Outcome {
                kind: NoticeKind::Success,
                text: if verdict.message.is_empty() {
                    "¡Correcto!".to_owned()
                } else {
                    verdict.message
                },
                end,
            },
        }
    }

    fn take_hint(&mut self, rng: &mut fastrand::Rng) -> Option<Hint> {
        if self.is_over() {
            return None;
        }
        let budget = self.hints.as_mut()?;
        if !budget.can_use() {
            return None;
        }
        let hidden: Vec<usize> = self.board.hidden().map(|(index, _)| index).collect();
        if hidden.is_empty() {
            return None;
        }
        let index = hidden[rng.usize(..hidden.len())];
        budget.consume();

        let item = &self.board.items()[index];
        Some(Hint {
            index,
            category: item.category.clone(),
            detail: item
                .detail
                .clone()
                .unwrap_or_else(|| DEFAULT_NATIONALITY.to_owned()),
        })
    }

    fn take_paid_reveal(&mut self) -> Option<Option<EndReason>> {
        if self.is_over() || !self.rules.paid_reveal {
            return None;
        }
        let lives = self.lives.as_mut()?;
        if lives.is_exhausted() || self.board.all_revealed() {
            return None;
        }
        self.board.reveal_next(RevealCause::Paid);
        lives.lose();
        Some(lives.is_exhausted().then_some(EndReason::OutOfLives))
    }
}

/// A mounted game page
#[derive(Debug)]
pub struct Session {
    game_type: GameType,
    generation: Generation,
    phase: Phase,
    notice: Option<Notice>,
    next_notice: u64,
    torn_down: bool,
    rng: fastrand::Rng,
}

impl Session {
    /// Mounts a page for `game_type` and returns the fetch it needs
    pub fn mount(game_type: GameType) -> (Self, FetchTicket) {
        let session = Self {
            game_type,
            generation: Generation::default().next(),
            phase: Phase::Loading,
            notice: None,
            next_notice: 0,
            torn_down: false,
            rng: fastrand::Rng::new(),
        };
        let ticket = session.fetch_ticket();
        (session, ticket)
    }

    /// Replaces the random source used to pick hints
    #[must_use]
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    /// Game type of the page
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Current generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The loaded game, if any
    pub fn game(&self) -> Option<&Game> {
        match &self.phase {
            Phase::Playing(game) => Some(&**game),
            Phase::Loading | Phase::LoadFailed(_) => None,
        }
    }

    /// Status of the loaded game, if any
    pub fn status(&self) -> Option<Status> {
        self.game().map(Game::status)
    }

    /// The notice currently shown
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether the page has been torn down
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn fetch_ticket(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            game_type: self.game_type,
        }
    }

    fn is_current(&self, generation: Generation) -> bool {
        !self.torn_down && generation == self.generation
    }

    fn active_game_mut(&mut self) -> Option<&mut Game> {
        match &mut self.phase {
            Phase::Playing(game) if !game.is_over() => Some(&mut **game),
            _ => None,
        }
    }

    fn next_notice_id(&mut self) -> NoticeId {
        self.next_notice += 1;
        NoticeId(self.next_notice)
    }

    fn post<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        kind: NoticeKind,
        text: String,
        schedule: &mut S,
    ) {
        let id = self.next_notice_id();
        self.notice = Some(Notice {
            id,
            kind,
            text,
            sticky: false,
        });
        schedule(
            AlarmMessage::ClearNotice {
                generation: self.generation,
                notice: id,
            },
            kind.lifetime(),
        );
    }

    fn post_sticky(&mut self, kind: NoticeKind, text: String) {
        let id = self.next_notice_id();
        self.notice = Some(Notice {
            id,
            kind,
            text,
            sticky: true,
        });
    }

    fn conclude(&mut self, reason: EndReason) {
        let Phase::Playing(game) = &mut self.phase else {
            return;
        };
        if !game.finish(reason) {
            return;
        }
        let text = game.details.end_text(reason, game);
        tracing::info!(game_id = %game.game_id, ?reason, "game over");
        let kind = match reason.status() {
            Status::Won => NoticeKind::Success,
            Status::Active | Status::Lost => NoticeKind::Failure,
        };
        self.post_sticky(kind, text);
    }

    /// Re-issues the fetch after a load failure
    ///
    /// Returns `None` unless the page is in [`Phase::LoadFailed`].
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.torn_down || !matches!(self.phase, Phase::LoadFailed(_)) {
            return None;
        }
        self.generation = self.generation.next();
        self.phase = Phase::Loading;
        Some(self.fetch_ticket())
    }

    /// Reports the outcome of a fetch
    ///
    /// Returns `false` if the completion was stale and ignored.
    pub fn receive_session<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        generation: Generation,
        result: Result<SessionPayload, api::Error>,
        mut schedule: S,
    ) -> bool {
        if !self.is_current(generation) || !matches!(self.phase, Phase::Loading) {
            tracing::debug!(?generation, "dropping stale session response");
            return false;
        }
        match result {
            Ok(payload) if payload.game_type() == self.game_type => {
                let game = Game::new(self.game_type, Setup::from(payload));
                tracing::info!(
                    game_id = %game.game_id,
                    items = game.board.total(),
                    "session loaded"
                );
                if game.clock.is_some() {
                    schedule(AlarmMessage::Tick { generation }, TICK);
                }
                self.phase = Phase::Playing(Box::new(game));
            }
            Ok(payload) => {
                tracing::warn!(
                    expected = %self.game_type,
                    received = %payload.game_type(),
                    "session payload for another game"
                );
                self.phase = Phase::LoadFailed(LOAD_FAILED_TEXT.to_owned());
            }
            Err(e) => {
                tracing::warn!(game_type = %self.game_type, "failed to load session: {e}");
                self.phase = Phase::LoadFailed(LOAD_FAILED_TEXT.to_owned());
            }
        }
        true
    }

    /// Turns player input into a verification request
    ///
    /// Blank or over-long input, and any input while no game is active,
    /// produce nothing.
    pub fn submit_guess(&self, input: &str) -> Option<GuessTicket> {
        if self.torn_down {
            return None;
        }
        let game = self.game().filter(|game| !game.is_over())?;
        let guess = Guess {
            answer: input.trim().to_owned(),
        };
        if let Err(report) = guess.validate() {
            tracing::debug!("ignoring guess: {report}");
            return None;
        }
        Some(GuessTicket {
            generation: self.generation,
            request: GuessRequest {
                game_id: game.game_id.clone(),
                game_type: game.game_type,
                answer: guess.answer,
                elapsed_seconds: game.clock.map(|clock| clock.elapsed()),
            },
        })
    }

    /// Reports the outcome of a verification
    ///
    /// Returns `false` if the completion was stale or the game had already
    /// finished.
    pub fn receive_verdict<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        generation: Generation,
        result: Result<VerifyResult, api::Error>,
        mut schedule: S,
    ) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(?generation, "dropping stale verdict");
            return false;
        }
        let Some(game) = self.active_game_mut() else {
            tracing::debug!("dropping verdict for a finished game");
            return false;
        };
        let outcome = match result {
            Ok(verdict) => game.apply_verdict(verdict),
            Err(e) => {
                tracing::warn!(game_id = %game.game_id, "failed to verify guess: {e}");
                Outcome {
                    kind: NoticeKind::Failure,
                    text: VERIFY_FAILED_TEXT.to_owned(),
                    end: None,
                }
            }
        };
        self.post(outcome.kind, outcome.text, &mut schedule);
        if let Some(reason) = outcome.end {
            self.conclude(reason);
        }
        true
    }

    /// Discloses the category of a random hidden item
    ///
    /// Only variants with a hint budget allow this, and only while hints
    /// remain and items are hidden.
    pub fn use_hint<S: FnMut(AlarmMessage, Duration)>(&mut self, mut schedule: S) -> Option<Hint> {
        if self.torn_down {
            return None;
        }
        let Phase::Playing(game) = &mut self.phase else {
            return None;
        };
        let hint = game.take_hint(&mut self.rng)?;
        self.post(
            NoticeKind::Hint,
            format!("Pista: {} - {}", hint.category, hint.detail),
            &mut schedule,
        );
        Some(hint)
    }

    /// Spends a life to uncover the next hidden item
    pub fn reveal_paid<S: FnMut(AlarmMessage, Duration)>(&mut self, mut schedule: S) -> bool {
        if self.torn_down {
            return false;
        }
        let Some(end) = self
            .active_game_mut()
            .and_then(Game::take_paid_reveal)
        else {
            return false;
        };
        match end {
            Some(reason) => self.conclude(reason),
            None => self.post(
                NoticeKind::Info,
                "Club revelado (-1 vida)".to_owned(),
                &mut schedule,
            ),
        }
        true
    }

    /// Gives up, revealing everything
    pub fn surrender(&mut self) -> bool {
        if self.torn_down || self.active_game_mut().is_none() {
            return false;
        }
        self.conclude(EndReason::Surrendered);
        true
    }

    /// Handles a scheduled alarm
    ///
    /// Returns `false` if the alarm was stale or had nothing left to do.
    pub fn receive_alarm<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule: S,
    ) -> bool {
        match message {
            AlarmMessage::ClearNotice { generation, notice } => {
                let matches = self
                    .notice
                    .as_ref()
                    .is_some_and(|current| current.id == notice && !current.sticky);
                if self.is_current(generation) && matches {
                    self.notice = None;
                    true
                } else {
                    false
                }
            }
            AlarmMessage::Tick { generation } => {
                if !self.is_current(generation) {
                    return false;
                }
                let Some(clock) = self.active_game_mut().and_then(|game| game.clock.as_mut())
                else {
                    return false;
                };
                if clock.tick() == 0 {
                    self.conclude(EndReason::TimeExpired);
                } else {
                    schedule(AlarmMessage::Tick { generation }, TICK);
                }
                true
            }
        }
    }

    /// Discards the page: every outstanding ticket and alarm becomes stale
    pub fn teardown(&mut self) {
        if !self.torn_down {
            self.torn_down = true;
            self.generation = self.generation.next();
            self.notice = None;
            tracing::debug!(game_type = %self.game_type, "session torn down");
        }
    }
}
