use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, Language, TileId, TileState};
use crate::core::round::Round;
use crate::renderer::commands::RenderCommand;

/// At most one selected tile per column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub source: Option<TileId>,
    pub target: Option<TileId>,
}

impl SelectionState {
    pub fn slot(&self, language: Language) -> Option<TileId> {
        match language {
            Language::Source => self.source,
            Language::Target => self.target,
        }
    }

    fn slot_mut(&mut self, language: Language) -> &mut Option<TileId> {
        match language {
            Language::Source => &mut self.source,
            Language::Target => &mut self.target,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.target.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Matched tile, unknown tile, or a tile from another round. Nothing changed.
    Ignored,
    /// The tile is now selected; the other column has no selection yet.
    Selected,
    /// Both tiles are now matched.
    Matched { source: TileId, target: TileId, round_complete: bool },
    /// Wrong pairing. Both tiles stay selected until `revert_mismatch`.
    Mismatched { source: TileId, target: TileId },
}

/// Selection and pairing rules for one round's tiles.
///
/// The engine only changes tile state; it never creates or removes tiles and
/// it keeps no timing of its own. Whoever owns the clock decides when a
/// mismatch is reverted.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    selection: SelectionState,
}

impl MatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Forget any selection. Called when a round starts.
    pub fn reset(&mut self) {
        self.selection.clear();
    }

    /// Apply one tile click.
    pub fn select(&mut self, round: &mut Round, id: TileId, ctx: &mut EngineContext) -> SelectOutcome {
        let language = match round.tile(id) {
            Some(tile) if tile.state() == TileState::Matched => return SelectOutcome::Ignored,
            Some(tile) => tile.language(),
            None => {
                log::debug!("match engine: tile {:?} is not in round {}", id, round.number());
                return SelectOutcome::Ignored;
            }
        };

        let slot = self.selection.slot_mut(language);
        if let Some(previous) = slot.replace(id) {
            if previous != id {
                set_state(round, previous, TileState::Idle, ctx);
            }
        }
        set_state(round, id, TileState::Selected, ctx);

        match (self.selection.source, self.selection.target) {
            (Some(source), Some(target)) => self.evaluate(round, source, target, ctx),
            _ => SelectOutcome::Selected,
        }
    }

    fn evaluate(
        &mut self,
        round: &mut Round,
        source: TileId,
        target: TileId,
        ctx: &mut EngineContext,
    ) -> SelectOutcome {
        let is_match = match (round.tile(source), round.tile(target)) {
            (Some(s), Some(t)) => t.expected_counterpart() == s.text(),
            _ => false,
        };

        if !is_match {
            log::debug!("match engine: mismatch {:?} / {:?}", source, target);
            ctx.emit_event(GameEvent::Mismatch { source, target });
            return SelectOutcome::Mismatched { source, target };
        }

        set_state(round, source, TileState::Matched, ctx);
        set_state(round, target, TileState::Matched, ctx);
        self.selection.clear();

        let matched_pairs = round.record_match();
        log::debug!(
            "match engine: matched {:?} / {:?} ({}/{})",
            source,
            target,
            matched_pairs,
            round.total_pairs()
        );
        ctx.emit_event(GameEvent::Match { source, target, matched_pairs });

        let round_complete = round.is_complete();
        if round_complete {
            ctx.emit_event(GameEvent::RoundComplete { round: round.number() });
        }
        SelectOutcome::Matched { source, target, round_complete }
    }

    /// End the pause after a mismatch: tiles still selected and still held in
    /// their slot go back to idle. Tiles the player has since replaced or
    /// matched are left alone. Returns true if anything changed.
    pub fn revert_mismatch(
        &mut self,
        round: &mut Round,
        source: TileId,
        target: TileId,
        ctx: &mut EngineContext,
    ) -> bool {
        let mut changed = false;
        for (language, id) in [(Language::Source, source), (Language::Target, target)] {
            let slot = self.selection.slot_mut(language);
            if *slot != Some(id) {
                continue;
            }
            *slot = None;
            if round.tile(id).map(|t| t.state()) == Some(TileState::Selected) {
                set_state(round, id, TileState::Idle, ctx);
                changed = true;
            }
        }
        changed
    }
}

fn set_state(round: &mut Round, id: TileId, state: TileState, ctx: &mut EngineContext) {
    if let Some(tile) = round.tile_mut(id) {
        if tile.state() == TileState::Matched {
            return;
        }
        tile.set_state(state);
        ctx.render(RenderCommand::SetTileState { tile: id, state });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use crate::assets::words::TermPair;
    use crate::core::round::RoundSelector;

    fn round() -> Round {
        let pairs: Vec<_> = [("cat", "chat"), ("dog", "chien"), ("house", "maison"), ("tree", "arbre"), ("book", "livre")]
            .into_iter()
            .map(|(s, t)| Rc::new(TermPair::new(s, t)))
            .collect();
        let mut rng = SmallRng::seed_from_u64(42);
        RoundSelector::new().build_round(&pairs, &mut rng)
    }

    fn id(round: &Round, language: Language, text: &str) -> TileId {
        round.find(language, text).unwrap().id()
    }

    fn state(round: &Round, id: TileId) -> TileState {
        round.tile(id).unwrap().state()
    }

    #[test]
    fn correct_pair_matches_immediately() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let cat = id(&round, Language::Source, "cat");
        let chat = id(&round, Language::Target, "chat");

        assert_eq!(engine.select(&mut round, cat, &mut ctx), SelectOutcome::Selected);
        assert_eq!(state(&round, cat), TileState::Selected);

        let outcome = engine.select(&mut round, chat, &mut ctx);
        assert_eq!(outcome, SelectOutcome::Matched { source: cat, target: chat, round_complete: false });
        assert_eq!(state(&round, cat), TileState::Matched);
        assert_eq!(state(&round, chat), TileState::Matched);
        assert_eq!(round.matched_pairs(), 1);
        assert!(engine.selection().is_empty());
        assert!(ctx.events.contains(&GameEvent::Match { source: cat, target: chat, matched_pairs: 1 }));
    }

    #[test]
    fn target_first_also_matches() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let tree = id(&round, Language::Source, "tree");
        let arbre = id(&round, Language::Target, "arbre");

        engine.select(&mut round, arbre, &mut ctx);
        let outcome = engine.select(&mut round, tree, &mut ctx);
        assert!(matches!(outcome, SelectOutcome::Matched { .. }));
    }

    #[test]
    fn wrong_pair_stays_selected_until_reverted() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let dog = id(&round, Language::Source, "dog");
        let maison = id(&round, Language::Target, "maison");

        engine.select(&mut round, dog, &mut ctx);
        let outcome = engine.select(&mut round, maison, &mut ctx);
        assert_eq!(outcome, SelectOutcome::Mismatched { source: dog, target: maison });
        assert_eq!(state(&round, dog), TileState::Selected);
        assert_eq!(state(&round, maison), TileState::Selected);

        assert!(engine.revert_mismatch(&mut round, dog, maison, &mut ctx));
        assert_eq!(state(&round, dog), TileState::Idle);
        assert_eq!(state(&round, maison), TileState::Idle);
        assert!(engine.selection().is_empty());
        assert_eq!(round.matched_pairs(), 0);
    }

    #[test]
    fn selecting_another_tile_in_same_column_replaces_selection() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let cat = id(&round, Language::Source, "cat");
        let dog = id(&round, Language::Source, "dog");

        engine.select(&mut round, cat, &mut ctx);
        engine.select(&mut round, dog, &mut ctx);
        assert_eq!(state(&round, cat), TileState::Idle);
        assert_eq!(state(&round, dog), TileState::Selected);
        assert_eq!(engine.selection().source, Some(dog));
    }

    #[test]
    fn reselecting_the_same_tile_is_idempotent() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let cat = id(&round, Language::Source, "cat");

        engine.select(&mut round, cat, &mut ctx);
        assert_eq!(engine.select(&mut round, cat, &mut ctx), SelectOutcome::Selected);
        assert_eq!(state(&round, cat), TileState::Selected);
        assert_eq!(engine.selection().source, Some(cat));
    }

    #[test]
    fn clicking_a_matched_tile_is_a_no_op() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let cat = id(&round, Language::Source, "cat");
        let chat = id(&round, Language::Target, "chat");
        engine.select(&mut round, cat, &mut ctx);
        engine.select(&mut round, chat, &mut ctx);

        ctx.clear_frame_data();
        assert_eq!(engine.select(&mut round, cat, &mut ctx), SelectOutcome::Ignored);
        assert_eq!(state(&round, cat), TileState::Matched);
        assert!(ctx.events.is_empty());
        assert!(ctx.render.is_empty());
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn unknown_tile_is_ignored() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        assert_eq!(engine.select(&mut round, TileId(9999), &mut ctx), SelectOutcome::Ignored);
        assert!(ctx.render.is_empty());
    }

    #[test]
    fn rematching_during_mismatch_pause_skips_stale_revert() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let dog = id(&round, Language::Source, "dog");
        let maison = id(&round, Language::Target, "maison");
        let chien = id(&round, Language::Target, "chien");

        engine.select(&mut round, dog, &mut ctx);
        engine.select(&mut round, maison, &mut ctx);
        // Still inside the pause: the player picks the right target instead.
        let outcome = engine.select(&mut round, chien, &mut ctx);
        assert!(matches!(outcome, SelectOutcome::Matched { .. }));
        assert_eq!(state(&round, maison), TileState::Idle);

        assert!(!engine.revert_mismatch(&mut round, dog, maison, &mut ctx));
        assert_eq!(state(&round, dog), TileState::Matched);
    }

    #[test]
    fn last_match_completes_the_round() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let pairs = [("cat", "chat"), ("dog", "chien"), ("house", "maison"), ("tree", "arbre"), ("book", "livre")];

        let mut last = SelectOutcome::Ignored;
        for (s, t) in pairs {
            let s = id(&round, Language::Source, s);
            let t = id(&round, Language::Target, t);
            engine.select(&mut round, s, &mut ctx);
            last = engine.select(&mut round, t, &mut ctx);
        }
        assert!(matches!(last, SelectOutcome::Matched { round_complete: true, .. }));
        assert!(round.is_complete());
        assert_eq!(round.matched_pairs(), 5);
        assert!(ctx.events.contains(&GameEvent::RoundComplete { round: round.number() }));
    }

    #[test]
    fn select_records_render_commands() {
        let mut round = round();
        let mut engine = MatchEngine::new();
        let mut ctx = EngineContext::default();
        let cat = id(&round, Language::Source, "cat");
        engine.select(&mut round, cat, &mut ctx);
        let commands: Vec<_> = ctx.render.iter().cloned().collect();
        assert_eq!(commands, vec![RenderCommand::SetTileState { tile: cat, state: TileState::Selected }]);
    }
}
