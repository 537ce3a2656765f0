//! Rendering boundary.
//!
//! The browser implementation lives in `wordmatch-web` (DOM tiles and a CSS
//! progress bar). Anything else that can show tiles, such as a terminal front
//! end or a test recorder, implements the same trait.
//!
//! Clicks travel the other way: the front end pushes
//! [`InputEvent::TileClicked`](crate::input::queue::InputEvent) into the input
//! queue and never calls game logic directly.

use crate::api::types::{Language, TileId, TileState};
use super::commands::{RenderCommand, TileView};

/// Capabilities the game needs from whatever displays it.
///
/// # Example Implementation
///
/// ```ignore
/// struct TerminalRenderer { rows: Vec<String> }
///
/// impl TileRenderer for TerminalRenderer {
///     fn render_tile(&mut self, tile: &TileView) { self.rows.push(tile.text.clone()); }
///     fn clear_tiles(&mut self, _column: Language) { self.rows.clear(); }
///     fn set_tile_visual_state(&mut self, _tile: TileId, _state: TileState) {}
///     fn set_progress_bar(&mut self, _fraction: f32) {}
///     fn notify_end_of_session(&mut self) { println!("Time's up!"); }
/// }
/// ```
pub trait TileRenderer {
    /// Append a tile to its column, initially idle.
    fn render_tile(&mut self, tile: &TileView);

    /// Remove every tile in a column.
    fn clear_tiles(&mut self, column: Language);

    fn set_tile_visual_state(&mut self, tile: TileId, state: TileState);

    /// Remaining time as a fraction in [0, 1].
    fn set_progress_bar(&mut self, fraction: f32);

    fn notify_end_of_session(&mut self);

    /// Dispatch one recorded command to the matching capability.
    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::ClearTiles { column } => self.clear_tiles(*column),
            RenderCommand::RenderTile(tile) => self.render_tile(tile),
            RenderCommand::SetTileState { tile, state } => self.set_tile_visual_state(*tile, *state),
            RenderCommand::SetProgressBar { fraction } => self.set_progress_bar(*fraction),
            RenderCommand::EndOfSession => self.notify_end_of_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        tiles: Vec<TileId>,
        states: HashMap<TileId, TileState>,
        progress: Option<f32>,
        ended: bool,
    }

    impl TileRenderer for Recorder {
        fn render_tile(&mut self, tile: &TileView) {
            self.tiles.push(tile.id);
        }

        fn clear_tiles(&mut self, _column: Language) {
            self.tiles.clear();
        }

        fn set_tile_visual_state(&mut self, tile: TileId, state: TileState) {
            self.states.insert(tile, state);
        }

        fn set_progress_bar(&mut self, fraction: f32) {
            self.progress = Some(fraction);
        }

        fn notify_end_of_session(&mut self) {
            self.ended = true;
        }
    }

    #[test]
    fn apply_dispatches_every_command() {
        let mut r = Recorder::default();
        r.apply(&RenderCommand::RenderTile(TileView {
            id: TileId(1),
            text: "cat".into(),
            language: Language::Source,
        }));
        r.apply(&RenderCommand::SetTileState { tile: TileId(1), state: TileState::Selected });
        r.apply(&RenderCommand::SetProgressBar { fraction: 0.25 });
        r.apply(&RenderCommand::EndOfSession);

        assert_eq!(r.tiles, vec![TileId(1)]);
        assert_eq!(r.states[&TileId(1)], TileState::Selected);
        assert_eq!(r.progress, Some(0.25));
        assert!(r.ended);

        r.apply(&RenderCommand::ClearTiles { column: Language::Source });
        assert!(r.tiles.is_empty());
    }
}
