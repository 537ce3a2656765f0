use std::collections::HashSet;
use std::rc::Rc;
use rand::Rng;
use crate::assets::words::{parse_word_list, TermPair};
use crate::error::GameError;

/// Every term pair available to a session.
///
/// Pairs are shared with rounds through `Rc`, so a round references the
/// pool's pairs instead of copying them. Construction drops entries that
/// would break the one-counterpart-per-term rule, which means any sample is
/// unique by both source and target term.
#[derive(Debug, Clone)]
pub struct WordPool {
    pairs: Vec<Rc<TermPair>>,
}

impl WordPool {
    pub fn new(pairs: impl IntoIterator<Item = TermPair>) -> Self {
        let mut seen_source = HashSet::new();
        let mut seen_target = HashSet::new();
        let mut kept = Vec::new();

        for pair in pairs {
            let source = pair.source_term.trim();
            let target = pair.target_term.trim();
            if source.is_empty() || target.is_empty() {
                log::warn!("word pool: skipping entry with an empty term: {:?}", pair);
                continue;
            }
            if seen_source.contains(source) || seen_target.contains(target) {
                log::warn!("word pool: skipping duplicate term in {:?}", pair);
                continue;
            }
            seen_source.insert(source.to_string());
            seen_target.insert(target.to_string());
            kept.push(Rc::new(TermPair::new(source, target)));
        }

        log::debug!("word pool: {} usable pairs", kept.len());
        Self { pairs: kept }
    }

    /// Build a pool from a JSON word list.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(Self::new(parse_word_list(json)?))
    }

    /// Draw `n` distinct pairs uniformly at random, without replacement.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Rc<TermPair>>, GameError> {
        if self.pairs.len() < n {
            return Err(GameError::InsufficientData {
                required: n,
                available: self.pairs.len(),
            });
        }
        Ok(rand::seq::index::sample(rng, self.pairs.len(), n)
            .into_iter()
            .map(|i| Rc::clone(&self.pairs[i]))
            .collect())
    }

    pub fn pairs(&self) -> &[Rc<TermPair>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
