pub mod dom;
pub mod runner;

pub use dom::{DomLayout, DomRenderer};
pub use runner::GameRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wordmatch::{Game, GameConfig, GameController, GameError, InputEvent, SessionPhase, TileId, WordPool};

pub type WordMatchRunner = GameRunner<GameController, DomRenderer>;

thread_local! {
    static RUNNER: RefCell<Option<WordMatchRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Returns `None` before `game_init` or if
/// the runner is already borrowed further up the stack.
fn with_runner<R>(f: impl FnOnce(&mut WordMatchRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::warn!("wordmatch: runner busy, dropping call");
            return None;
        };
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("wordmatch: game not initialized, call game_init() first");
                None
            }
        }
    })
}

fn push_click(tile: TileId) {
    with_runner(|r| r.push_input(InputEvent::TileClicked { tile }));
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the game from a JSON word list and an optional JSON config, lay out
/// the first round and start the countdown.
#[wasm_bindgen]
pub fn game_init(words_json: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let pool = WordPool::from_json(words_json).map_err(to_js)?;
    let config = match config_json.as_deref() {
        Some(json) => GameConfig::from_json(json).map_err(to_js)?,
        None => GameConfig::default(),
    };
    let seed = random_seed();

    let renderer = DomRenderer::new(DomLayout::default(), push_click)?;
    let mut runner = GameRunner::new(GameController::with_config(pool, config, seed), renderer);
    // Drop any previous runner first so its tiles and listeners go away.
    RUNNER.with(|cell| cell.replace(None));
    runner.init().map_err(to_js)?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("wordmatch: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Click on a tile by id, for pages that render tiles themselves.
#[wasm_bindgen]
pub fn game_tile_clicked(id: u32) {
    push_click(TileId(id));
}

/// Start over with a new controller on the same words and config. The old
/// session, running or ended, is discarded.
#[wasm_bindgen]
pub fn game_new_session() -> Result<(), JsValue> {
    let seed = random_seed();
    let restarted = with_runner(|r| {
        let fresh = GameController::with_config(r.game().pool().clone(), r.game().config(), seed);
        r.restart(fresh)
    });
    match restarted {
        Some(result) => result.map_err(to_js),
        None => Ok(()),
    }
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_remaining_secs() -> u32 {
    with_runner(|r| r.game().timer().remaining_secs()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_round() -> u32 {
    with_runner(|r| r.game().round().map_or(0, |round| round.number())).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_matched_pairs() -> u32 {
    with_runner(|r| r.game().round().map_or(0, |round| round.matched_pairs() as u32)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_rounds_completed() -> u32 {
    with_runner(|r| r.game().rounds_completed()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_total_matches() -> u32 {
    with_runner(|r| r.game().total_matches()).unwrap_or(0)
}

/// 0 = not started, 1 = running, 2 = ended.
#[wasm_bindgen]
pub fn get_phase() -> u32 {
    with_runner(|r| match r.game().phase() {
        SessionPhase::NotStarted => 0,
        SessionPhase::Running => 1,
        SessionPhase::Ended => 2,
    })
    .unwrap_or(0)
}
