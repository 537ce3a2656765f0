use std::rc::Rc;
use rand::seq::SliceRandom;
use rand::Rng;
use crate::api::types::{Language, TileId, TileState};
use crate::assets::words::TermPair;
use crate::renderer::commands::TileView;

/// A single displayed term. The text and its expected counterpart both come
/// from the originating pair, so a tile can never disagree with its pair.
#[derive(Debug, Clone)]
pub struct DisplayedTile {
    id: TileId,
    pair: Rc<TermPair>,
    language: Language,
    state: TileState,
}

impl DisplayedTile {
    pub fn new(id: TileId, pair: Rc<TermPair>, language: Language) -> Self {
        Self {
            id,
            pair,
            language,
            state: TileState::Idle,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }

    pub fn text(&self) -> &str {
        match self.language {
            Language::Source => &self.pair.source_term,
            Language::Target => &self.pair.target_term,
        }
    }

    /// The text of the tile this one pairs with.
    pub fn expected_counterpart(&self) -> &str {
        match self.language {
            Language::Source => &self.pair.target_term,
            Language::Target => &self.pair.source_term,
        }
    }

    pub fn view(&self) -> TileView {
        TileView {
            id: self.id,
            text: self.text().to_string(),
            language: self.language,
        }
    }
}

/// One set of pairs on screen. `matched_pairs` only ever grows, and the round
/// is complete when it reaches `total_pairs`.
#[derive(Debug, Clone)]
pub struct Round {
    number: u32,
    tiles: Vec<DisplayedTile>,
    total_pairs: usize,
    matched_pairs: usize,
}

impl Round {
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Source column first, then target column, each in display order.
    pub fn tiles(&self) -> &[DisplayedTile] {
        &self.tiles
    }

    pub fn column(&self, language: Language) -> impl Iterator<Item = &DisplayedTile> {
        self.tiles.iter().filter(move |t| t.language == language)
    }

    pub fn tile(&self, id: TileId) -> Option<&DisplayedTile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut DisplayedTile> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    /// Find a tile by its displayed text within one column.
    pub fn find(&self, language: Language, text: &str) -> Option<&DisplayedTile> {
        self.column(language).find(|t| t.text() == text)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tile(id).is_some()
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    /// Count one more matched pair. Saturates at `total_pairs`.
    pub(crate) fn record_match(&mut self) -> usize {
        self.matched_pairs = (self.matched_pairs + 1).min(self.total_pairs);
        self.matched_pairs
    }
}

/// Lays sampled pairs out as two independently shuffled columns.
///
/// Shuffling both columns (rather than one against a fixed other) keeps row
/// position from carrying any pairing information.
#[derive(Debug, Clone)]
pub struct RoundSelector {
    next_tile: u32,
    next_round: u32,
}

impl RoundSelector {
    pub fn new() -> Self {
        Self {
            next_tile: 1,
            next_round: 1,
        }
    }

    /// Generate the next unique tile ID.
    fn next_id(&mut self) -> TileId {
        let id = TileId(self.next_tile);
        self.next_tile += 1;
        id
    }

    pub fn build_round<R: Rng + ?Sized>(&mut self, pairs: &[Rc<TermPair>], rng: &mut R) -> Round {
        let mut source_order: Vec<Rc<TermPair>> = pairs.to_vec();
        let mut target_order: Vec<Rc<TermPair>> = pairs.to_vec();
        source_order.shuffle(rng);
        target_order.shuffle(rng);

        let mut tiles = Vec::with_capacity(pairs.len() * 2);
        for pair in source_order {
            let id = self.next_id();
            tiles.push(DisplayedTile::new(id, pair, Language::Source));
        }
        for pair in target_order {
            let id = self.next_id();
            tiles.push(DisplayedTile::new(id, pair, Language::Target));
        }

        let number = self.next_round;
        self.next_round += 1;

        Round {
            number,
            tiles,
            total_pairs: pairs.len(),
            matched_pairs: 0,
        }
    }
}

impl Default for RoundSelector {
    fn default() -> Self {
        Self::new()
    }
}
