//! The memory game: one live session, its timers, and the scoreboard.

use tracing::info;

use crate::cards::{Card, CardId, DeckFactory, Symbol};
use crate::core::{EngineResult, GameConfig, GameRng, HistoryLimits};
use crate::history::{HistoryRecorder, MessageTier, OutcomeHistory, OutcomeRecord};
use crate::rules::{GameStatus, ScoringPolicy, TerminationEvaluator};
use crate::session::{DeferredAction, GameSession, RevealOutcome, SessionSnapshot};
use crate::store::KeyValueStore;
use crate::timers::{Generation, TimerQueue};

/// How the last session ended, with the message it earned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    /// What was recorded.
    pub record: OutcomeRecord,
    /// Message tier picked from the history before this game was added.
    pub tier: MessageTier,
}

impl GameOver {
    /// Message text for the tier.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.tier.text()
    }
}

/// Builder for creating a MemoryGame.
#[derive(Clone, Debug, Default)]
pub struct MemoryGameBuilder {
    config: GameConfig,
    seed: Option<u64>,
}

impl MemoryGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete config.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.config = self.config.with_symbols(symbols);
        self
    }

    pub fn scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.config = self.config.with_scoring(scoring);
        self
    }

    pub fn termination(mut self, termination: TerminationEvaluator) -> Self {
        self.config = self.config.with_termination(termination);
        self
    }

    pub fn delays(mut self, match_delay_ms: u64, mismatch_delay_ms: u64) -> Self {
        self.config = self.config.with_delays(match_delay_ms, mismatch_delay_ms);
        self
    }

    pub fn history(mut self, limits: HistoryLimits) -> Self {
        self.config = self.config.with_history(limits);
        self
    }

    /// Fix the dealing seed. Without one the RNG is seeded from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load history from `store` and deal the first session.
    pub fn build<S: KeyValueStore>(self, store: S) -> EngineResult<MemoryGame<S>> {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        MemoryGame::new(self.config, store, rng)
    }
}

/// A memory game bound to a history store.
///
/// All mutation happens through `&mut self` on the caller's thread. Time only
/// moves when the host calls [`advance`](Self::advance) (or
/// [`settle`](Self::settle)), which is when deferred steps fire.
pub struct MemoryGame<S> {
    config: GameConfig,
    rng: GameRng,
    session: GameSession,
    timers: TimerQueue<DeferredAction>,
    recorder: HistoryRecorder<S>,
    game_over: Option<GameOver>,
}

impl<S: KeyValueStore> MemoryGame<S> {
    /// Validate `config`, load history from `store`, and deal the first session.
    pub fn new(config: GameConfig, store: S, mut rng: GameRng) -> EngineResult<Self> {
        config.validate()?;

        let generation = Generation::new(1);
        let cards = DeckFactory::build(&config.symbols, &mut rng.fork())?;
        let session = GameSession::new(cards, generation, &config);
        let recorder = HistoryRecorder::load(store, config.history);

        info!(pairs = config.total_pairs(), seed = rng.seed(), %generation, "memory game ready");

        Ok(Self {
            config,
            rng,
            session,
            timers: TimerQueue::new(),
            recorder,
            game_over: None,
        })
    }

    // === Session Lifecycle ===

    /// Throw away the current session and deal a new one from the config.
    pub fn new_game(&mut self) -> SessionSnapshot {
        let mut rng = self.rng.fork();
        // The config is validated on construction and never mutated after
        let cards = DeckFactory::deal(&self.config.symbols, &mut rng);
        self.install(cards)
    }

    /// Throw away the current session and deal a new one from `symbols`
    /// using `rng`. On error the current session is left untouched.
    pub fn new_game_with(&mut self, symbols: &[Symbol], rng: &mut GameRng) -> EngineResult<SessionSnapshot> {
        let cards = DeckFactory::build(symbols, rng)?;
        Ok(self.install(cards))
    }

    fn install(&mut self, cards: Vec<Card>) -> SessionSnapshot {
        let previous = self.session.generation();
        let generation = previous.next();
        let cancelled = self.timers.cancel_generation(previous);

        self.session = GameSession::new(cards, generation, &self.config);
        self.game_over = None;

        info!(%generation, cancelled, pairs = self.session.total_pairs(), "new game dealt");
        self.session.snapshot()
    }

    // === Turn Cycle ===

    /// Turn a card face-up. Disallowed reveals are no-ops.
    pub fn reveal(&mut self, id: CardId) -> RevealOutcome {
        let outcome = self.session.reveal(id, &mut self.timers);
        self.finish_if_over();
        outcome
    }

    /// Let `elapsed_ms` pass, firing every deferred step that comes due.
    /// Returns how many steps were applied.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let until = self.timers.now().saturating_add(elapsed_ms);
        let mut applied = 0;
        while let Some(timer) = self.timers.pop_due(until) {
            if self.session.resolve(&timer) {
                applied += 1;
            }
            self.finish_if_over();
        }
        self.timers.advance_clock(until);
        applied
    }

    /// Fire every outstanding deferred step, however far off.
    pub fn settle(&mut self) -> usize {
        let mut applied = 0;
        while let Some(due) = self.timers.next_due() {
            applied += self.advance(due.saturating_sub(self.timers.now()));
        }
        applied
    }

    fn finish_if_over(&mut self) {
        let status = self.session.status();
        if !status.is_terminal() || self.session.is_recorded() {
            return;
        }

        // Pick the message before this game joins the history
        let tier = OutcomeHistory::tier(status == GameStatus::Won, self.recorder.recent_results());
        if let Some(record) = self.recorder.record(&mut self.session) {
            info!(won = record.won, score = record.score, ?tier, "game over");
            self.game_over = Some(GameOver { record, tier });
        }
    }

    // === Read Access ===

    /// Read-only view of the live session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// The live session.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// How the live session ended, once it has.
    #[must_use]
    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    /// End-of-game message for the live session, once it has ended.
    #[must_use]
    pub fn outcome_message(&self) -> Option<&'static str> {
        self.game_over.as_ref().map(GameOver::message)
    }

    /// Scoreboard high score (stored high score or any recent score above it).
    #[must_use]
    pub fn high_score(&self) -> i32 {
        self.recorder.display_high_score()
    }

    #[must_use]
    pub fn recent_scores(&self) -> &[i32] {
        self.recorder.recent_scores()
    }

    #[must_use]
    pub fn recent_results(&self) -> &[OutcomeRecord] {
        self.recorder.recent_results()
    }

    #[must_use]
    pub fn recorder(&self) -> &HistoryRecorder<S> {
        &self.recorder
    }

    /// Current clock reading in ms.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.timers.now()
    }

    /// Deferred steps not yet fired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
