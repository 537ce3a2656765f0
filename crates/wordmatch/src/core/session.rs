use std::time::Duration;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{GameEvent, Language, TileId};
use crate::core::matching::{MatchEngine, SelectOutcome, SelectionState};
use crate::core::pool::WordPool;
use crate::core::round::{Round, RoundSelector};
use crate::core::schedule::{Scheduler, TaskHandle};
use crate::core::timer::{RoundTimer, TimerEvent};
use crate::error::GameError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::commands::RenderCommand;

/// Session lifecycle. `Ended` absorbs every click and deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Ended,
}

/// Work that runs after a delay on the step clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    RevertMismatch { round: u32, source: TileId, target: TileId },
    AdvanceRound { completed: u32 },
}

/// Owns one session: the word pool, the current round, the countdown and
/// the pending delays. Rounds come and go; the countdown spans them all.
pub struct GameController {
    config: GameConfig,
    pool: WordPool,
    rng: SmallRng,
    selector: RoundSelector,
    engine: MatchEngine,
    timer: RoundTimer,
    round: Option<Round>,
    phase: SessionPhase,
    scheduler: Scheduler<Deferred>,
    pending_revert: Option<TaskHandle>,
    rounds_completed: u32,
    total_matches: u32,
    timer_events: Vec<TimerEvent>,
}

impl GameController {
    pub fn new(pool: WordPool, seed: u64) -> Self {
        Self::with_config(pool, GameConfig::default(), seed)
    }

    pub fn with_config(pool: WordPool, config: GameConfig, seed: u64) -> Self {
        let timer = RoundTimer::new(config.session_secs);
        Self {
            config,
            pool,
            rng: SmallRng::seed_from_u64(seed),
            selector: RoundSelector::new(),
            engine: MatchEngine::new(),
            timer,
            round: None,
            phase: SessionPhase::NotStarted,
            scheduler: Scheduler::new(),
            pending_revert: None,
            rounds_completed: 0,
            total_matches: 0,
            timer_events: Vec::with_capacity(4),
        }
    }

    /// Begin the session: lay out the first round and start the countdown.
    /// A controller runs a single session, so this only works from `NotStarted`.
    pub fn start_session(&mut self, ctx: &mut EngineContext) -> Result<(), GameError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(GameError::SessionAlreadyStarted);
        }
        self.config.validate()?;
        let pairs = self.pool.sample(self.config.round_size, &mut self.rng)?;
        self.phase = SessionPhase::Running;

        let round = self.selector.build_round(&pairs, &mut self.rng);
        self.lay_out(round, ctx);
        ctx.render(RenderCommand::SetProgressBar { fraction: self.timer.remaining_fraction() });

        log::info!(
            "session: started with {} pairs per round, {}s on the clock",
            self.config.round_size,
            self.config.session_secs
        );
        Ok(())
    }

    /// Replace whatever is on screen with `round`.
    fn lay_out(&mut self, round: Round, ctx: &mut EngineContext) {
        self.engine.reset();
        ctx.render(RenderCommand::ClearTiles { column: Language::Source });
        ctx.render(RenderCommand::ClearTiles { column: Language::Target });
        for tile in round.tiles() {
            ctx.render(RenderCommand::RenderTile(tile.view()));
        }
        ctx.emit_event(GameEvent::RoundStarted { round: round.number() });
        log::info!("session: round {} laid out", round.number());
        self.round = Some(round);
    }

    fn start_next_round(&mut self, ctx: &mut EngineContext) {
        match self.pool.sample(self.config.round_size, &mut self.rng) {
            Ok(pairs) => {
                let round = self.selector.build_round(&pairs, &mut self.rng);
                self.lay_out(round, ctx);
            }
            Err(err) => log::error!("session: cannot start next round: {}", err),
        }
    }

    /// Route a tile click. Ignored unless the session is running.
    pub fn select(&mut self, id: TileId, ctx: &mut EngineContext) -> SelectOutcome {
        if self.phase != SessionPhase::Running {
            log::debug!("session: click on {:?} ignored in {:?}", id, self.phase);
            return SelectOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return SelectOutcome::Ignored;
        };

        let outcome = self.engine.select(round, id, ctx);
        match outcome {
            SelectOutcome::Matched { round_complete, .. } => {
                self.total_matches += 1;
                if round_complete {
                    self.rounds_completed += 1;
                    let completed = round.number();
                    self.scheduler.schedule(
                        self.config.round_advance_delay(),
                        Deferred::AdvanceRound { completed },
                    );
                }
            }
            SelectOutcome::Mismatched { source, target } => {
                // A fresh mismatch restarts the pause.
                if let Some(handle) = self.pending_revert.take() {
                    self.scheduler.cancel(handle);
                }
                let handle = self.scheduler.schedule(
                    self.config.mismatch_delay(),
                    Deferred::RevertMismatch { round: round.number(), source, target },
                );
                self.pending_revert = Some(handle);
            }
            SelectOutcome::Selected | SelectOutcome::Ignored => {}
        }
        outcome
    }

    /// Move session time forward: countdown first, then due deferred tasks.
    pub fn advance(&mut self, dt: Duration, ctx: &mut EngineContext) {
        if self.phase != SessionPhase::Running {
            return;
        }

        let mut timer_events = std::mem::take(&mut self.timer_events);
        self.timer.advance(dt, &mut timer_events);
        for event in timer_events.drain(..) {
            match event {
                TimerEvent::Tick { remaining_secs, remaining_fraction } => {
                    ctx.render(RenderCommand::SetProgressBar { fraction: remaining_fraction });
                    ctx.emit_event(GameEvent::Tick { remaining_secs, remaining_fraction });
                }
                TimerEvent::Expired => self.end_session(ctx),
            }
        }
        self.timer_events = timer_events;

        if self.phase != SessionPhase::Running {
            return;
        }
        for task in self.scheduler.advance(dt) {
            self.run_deferred(task, ctx);
        }
    }

    fn run_deferred(&mut self, task: Deferred, ctx: &mut EngineContext) {
        let current = self.round.as_ref().map(|r| r.number());
        match task {
            Deferred::RevertMismatch { round: number, source, target } => {
                self.pending_revert = None;
                if current != Some(number) {
                    return;
                }
                if let Some(round) = self.round.as_mut() {
                    self.engine.revert_mismatch(round, source, target, ctx);
                }
            }
            Deferred::AdvanceRound { completed } => {
                if current == Some(completed) {
                    self.start_next_round(ctx);
                }
            }
        }
    }

    fn end_session(&mut self, ctx: &mut EngineContext) {
        self.phase = SessionPhase::Ended;
        if !self.scheduler.is_empty() {
            log::debug!("session: dropping pending round tasks");
        }
        self.scheduler.clear();
        self.pending_revert = None;
        ctx.emit_event(GameEvent::Expired);
        ctx.render(RenderCommand::EndOfSession);
        log::info!(
            "session: time's up after {} rounds and {} matches",
            self.rounds_completed,
            self.total_matches
        );
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn selection(&self) -> SelectionState {
        self.engine.selection()
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn total_matches(&self) -> u32 {
        self.total_matches
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }
}

impl Game for GameController {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), GameError> {
        self.start_session(ctx)
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // Time first, so a click landing in the step that expires the
        // countdown is absorbed by the ended session.
        self.advance(ctx.dt(), ctx);

        for event in input.iter() {
            match *event {
                InputEvent::TileClicked { tile } => {
                    self.select(tile, ctx);
                }
            }
        }
    }
}
