use std::time::Duration;
use wordmatch::{
    Game, GameConfig, EngineContext, GameError,
    InputEvent, InputQueue, FixedTimestep, TileRenderer,
};

/// Generic game runner that wires up the engine loop.
///
/// The page drives it with `tick(dt)` from `requestAnimationFrame` and
/// pushes click notifications between frames. After every frame the recorded
/// render commands are replayed into the renderer.
pub struct GameRunner<G: Game, R: TileRenderer> {
    game: G,
    renderer: R,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game, R: TileRenderer> GameRunner<G, R> {
    pub fn new(game: G, renderer: R) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt()).with_max_steps(config.max_steps_per_frame);

        Self {
            game,
            renderer,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) -> Result<(), GameError> {
        self.config = self.game.config();
        self.config.validate()?;
        self.timestep = FixedTimestep::new(self.config.fixed_dt()).with_max_steps(self.config.max_steps_per_frame);
        self.ctx = EngineContext::from_config(&self.config);

        let result = self.game.init(&mut self.ctx);
        // Whatever init managed to lay out still goes to the screen.
        self.flush_render();
        result?;
        self.initialized = true;
        Ok(())
    }

    /// Replace the game with a fresh one and initialize it. The renderer is
    /// kept; the new game's first layout replaces whatever the old one drew.
    pub fn restart(&mut self, game: G) -> Result<(), GameError> {
        self.game = game;
        self.input.clear();
        self.initialized = false;
        self.init()
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed steps for the elapsed time, then render.
    pub fn tick(&mut self, dt_secs: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let frame_dt = Duration::try_from_secs_f32(dt_secs.max(0.0)).unwrap_or(Duration::ZERO);
        let steps = self.timestep.accumulate(frame_dt);
        // Steps past the per-frame cap still happened on the wall clock.
        let backlog = self.timestep.take_backlog();
        for step in 0..steps {
            let dt = if step == 0 { self.timestep.dt() + backlog } else { self.timestep.dt() };
            self.ctx.set_dt(dt);
            self.game.update(&mut self.ctx, &self.input);
            // Input belongs to the first step; a frame with no steps keeps it.
            self.input.clear();
        }

        self.flush_render();
    }

    fn flush_render(&mut self) {
        for command in self.ctx.render.drain() {
            self.renderer.apply(&command);
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ---- Pointer accessors for page reads of linear memory ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.wire_events().as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.wire_events().len() as u32
    }
}
