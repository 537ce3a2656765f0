pub mod api;
pub mod core;
pub mod input;
pub mod assets;
pub mod renderer;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{TileId, Language, TileState, GameEvent, WireEvent};
pub use assets::words::{TermPair, parse_word_list};
pub use core::pool::WordPool;
pub use core::round::{Round, RoundSelector, DisplayedTile};
pub use core::matching::{MatchEngine, SelectionState, SelectOutcome};
pub use core::timer::{RoundTimer, TimerEvent};
pub use core::session::{GameController, SessionPhase};
pub use core::schedule::{Scheduler, TaskHandle};
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::commands::{RenderCommand, RenderQueue, TileView};
pub use renderer::traits::TileRenderer;
pub use error::GameError;
