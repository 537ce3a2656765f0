use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for a displayed tile.
/// Ids are never reused within a session, so a click on a tile from a
/// replaced round can be told apart from a click on the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// Which column a tile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Source,
    Target,
}

impl Language {
    /// The column holding this tile's counterparts.
    pub fn other(self) -> Self {
        match self {
            Language::Source => Language::Target,
            Language::Target => Language::Source,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Source => "source",
            Language::Target => "target",
        }
    }
}

/// Display state of a tile. `Matched` is terminal for the tile's round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Idle,
    Selected,
    Matched,
}

/// Something the game wants the page (and tests) to know about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new round was laid out.
    RoundStarted { round: u32 },
    /// A correct pairing. `matched_pairs` is the round's count after this match.
    Match { source: TileId, target: TileId, matched_pairs: usize },
    /// A wrong pairing; both tiles stay selected until the reset delay fires.
    Mismatch { source: TileId, target: TileId },
    /// Every pair in the round is matched.
    RoundComplete { round: u32 },
    /// One second of the session countdown elapsed.
    Tick { remaining_secs: u32, remaining_fraction: f32 },
    /// The countdown hit zero. Emitted once per session.
    Expired,
}

// Wire kinds for `WireEvent::kind` (Rust → page).
pub const EVENT_ROUND_STARTED: f32 = 1.0;
pub const EVENT_MATCH: f32 = 2.0;
pub const EVENT_MISMATCH: f32 = 3.0;
pub const EVENT_ROUND_COMPLETE: f32 = 4.0;
pub const EVENT_TICK: f32 = 5.0;
pub const EVENT_EXPIRED: f32 = 6.0;

/// A game event flattened for the page to read out of linear memory.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;
}

impl From<&GameEvent> for WireEvent {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::RoundStarted { round } => WireEvent {
                kind: EVENT_ROUND_STARTED,
                a: round as f32,
                ..WireEvent::default()
            },
            GameEvent::Match { source, target, matched_pairs } => WireEvent {
                kind: EVENT_MATCH,
                a: source.0 as f32,
                b: target.0 as f32,
                c: matched_pairs as f32,
            },
            GameEvent::Mismatch { source, target } => WireEvent {
                kind: EVENT_MISMATCH,
                a: source.0 as f32,
                b: target.0 as f32,
                c: 0.0,
            },
            GameEvent::RoundComplete { round } => WireEvent {
                kind: EVENT_ROUND_COMPLETE,
                a: round as f32,
                ..WireEvent::default()
            },
            GameEvent::Tick { remaining_secs, remaining_fraction } => WireEvent {
                kind: EVENT_TICK,
                a: remaining_secs as f32,
                b: remaining_fraction,
                c: 0.0,
            },
            GameEvent::Expired => WireEvent {
                kind: EVENT_EXPIRED,
                ..WireEvent::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_other_flips_column() {
        assert_eq!(Language::Source.other(), Language::Target);
        assert_eq!(Language::Target.other(), Language::Source);
    }

    #[test]
    fn wire_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<WireEvent>(), WireEvent::FLOATS * 4);
    }

    #[test]
    fn match_event_packs_ids_and_count() {
        let wire = WireEvent::from(&GameEvent::Match {
            source: TileId(3),
            target: TileId(8),
            matched_pairs: 2,
        });
        assert_eq!(wire, WireEvent { kind: EVENT_MATCH, a: 3.0, b: 8.0, c: 2.0 });
    }

    #[test]
    fn tick_event_carries_fraction() {
        let wire = WireEvent::from(&GameEvent::Tick { remaining_secs: 60, remaining_fraction: 0.5 });
        assert_eq!(wire.kind, EVENT_TICK);
        assert_eq!(wire.a, 60.0);
        assert_eq!(wire.b, 0.5);
    }
}
