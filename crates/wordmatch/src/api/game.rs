use std::time::Duration;
use serde::Deserialize;
use crate::api::types::{GameEvent, WireEvent};
use crate::error::GameError;
use crate::input::queue::InputQueue;
use crate::renderer::commands::{RenderCommand, RenderQueue};

/// Configuration for the engine, provided by the game.
/// Every field has a default, so a JSON override only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pairs per round (default: 5).
    pub round_size: usize,
    /// Session countdown budget in seconds (default: 120).
    pub session_secs: u32,
    /// How long a wrong pairing stays visible before reverting (default: 500ms).
    pub mismatch_delay_ms: u64,
    /// Pause between a completed round and the next one (default: 1000ms).
    pub round_advance_delay_ms: u64,
    /// Fixed simulation step in milliseconds (default: 10).
    pub fixed_dt_ms: u64,
    /// Cap on fixed steps per frame (default: 10).
    pub max_steps_per_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_size: 5,
            session_secs: 120,
            mismatch_delay_ms: 500,
            round_advance_delay_ms: 1000,
            fixed_dt_ms: 10,
            max_steps_per_frame: 10,
        }
    }
}

impl GameConfig {
    /// Parse a config override from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json).map_err(GameError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.round_size == 0 {
            return Err(GameError::InvalidConfig("round_size must be at least 1"));
        }
        if self.session_secs == 0 {
            return Err(GameError::InvalidConfig("session_secs must be at least 1"));
        }
        if self.fixed_dt_ms == 0 {
            return Err(GameError::InvalidConfig("fixed_dt_ms must be at least 1"));
        }
        Ok(())
    }

    pub fn fixed_dt(&self) -> Duration {
        Duration::from_millis(self.fixed_dt_ms)
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn round_advance_delay(&self) -> Duration {
        Duration::from_millis(self.round_advance_delay_ms)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and lay out the first screen.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), GameError>;

    /// One fixed step: advance time by `ctx.dt()`, then consume queued input.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
/// Collects what the game produced this frame; the runner drains it afterwards.
pub struct EngineContext {
    pub render: RenderQueue,
    pub events: Vec<GameEvent>,
    wire_events: Vec<WireEvent>,
    dt: Duration,
}

impl EngineContext {
    pub fn new(dt: Duration) -> Self {
        Self {
            render: RenderQueue::new(),
            events: Vec::new(),
            wire_events: Vec::new(),
            dt,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.fixed_dt())
    }

    /// Time covered by the current step. Usually one fixed step; longer when
    /// the runner folds a frame's backlog into it.
    pub fn dt(&self) -> Duration {
        self.dt
    }

    pub fn set_dt(&mut self, dt: Duration) {
        self.dt = dt;
    }

    /// Emit a game event to be forwarded to the page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.wire_events.push(WireEvent::from(&event));
        self.events.push(event);
    }

    /// Record a call into the rendering boundary.
    pub fn render(&mut self, command: RenderCommand) {
        self.render.push(command);
    }

    /// This frame's events in wire format.
    pub fn wire_events(&self) -> &[WireEvent] {
        &self.wire_events
    }

    /// Clear per-frame transient data (events, pending render commands).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.wire_events.clear();
        self.render.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
