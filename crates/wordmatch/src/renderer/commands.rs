use crate::api::types::{Language, TileId, TileState};

/// What the rendering boundary needs to draw one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub id: TileId,
    pub text: String,
    pub language: Language,
}

/// One recorded call into the rendering boundary.
/// The engine never touches the page directly; the runner replays these
/// into a [`TileRenderer`](super::traits::TileRenderer) after each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Remove every tile from one column.
    ClearTiles { column: Language },
    /// Append a tile to the end of its column.
    RenderTile(TileView),
    SetTileState { tile: TileId, state: TileState },
    /// Remaining session time as a fraction in [0, 1].
    SetProgressBar { fraction: f32 },
    EndOfSession,
}

/// Ordered buffer of render commands for the current frame.
pub struct RenderQueue {
    commands: Vec<RenderCommand>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Take all pending commands in submission order.
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_keeps_submission_order() {
        let mut queue = RenderQueue::new();
        queue.push(RenderCommand::ClearTiles { column: Language::Source });
        queue.push(RenderCommand::SetProgressBar { fraction: 0.5 });
        let drained = queue.drain();
        assert_eq!(drained[0], RenderCommand::ClearTiles { column: Language::Source });
        assert_eq!(drained[1], RenderCommand::SetProgressBar { fraction: 0.5 });
        assert!(queue.is_empty());
    }
}
