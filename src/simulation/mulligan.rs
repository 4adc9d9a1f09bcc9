use crate::card::{fallback_pool, CardInstance, CardSpec};
use crate::rng::{shuffled, GameRng, RandomSource};
use crate::simulation::deck::build_deck;
use log::debug;
use std::collections::BTreeSet;
use thiserror::Error;

/// Number of cards in an opening hand
pub const HAND_SIZE: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MulliganError {
    #[error("Hand index {index} out of range (hand has {len} cards)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Cannot toggle card {index}: the mulligan has already been confirmed")]
    AlreadyResolved { index: usize },
}

/// Round phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Opening hand drawn, selection open
    Fresh,
    /// Exchange resolved, final hand fixed until the next restart
    Resolved,
}

/// Mulligan state machine for a single play session
///
/// `start` deals a fresh round from any phase, `toggle_selection` marks cards
/// of the opening hand for exchange, and `confirm` resolves the exchange once.
#[derive(Debug, Clone)]
pub struct MulliganEngine<R: RandomSource = GameRng> {
    rng: R,
    pool: Vec<CardSpec>,
    deck: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    selection: BTreeSet<usize>,
    final_hand: Vec<CardInstance>,
    phase: Phase,
}

impl MulliganEngine<GameRng> {
    /// Engine backed by a seeded RNG; `None` picks a random seed
    pub fn with_seed(pool: &[CardSpec], seed: Option<u64>) -> Self {
        MulliganEngine::new(pool, GameRng::new(seed))
    }

    /// Get the seed used for this session
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> MulliganEngine<R> {
    /// Create an engine and deal the first round
    pub fn new(pool: &[CardSpec], rng: R) -> Self {
        let mut engine = MulliganEngine {
            rng,
            pool: Vec::new(),
            deck: Vec::new(),
            hand: Vec::new(),
            selection: BTreeSet::new(),
            final_hand: Vec::new(),
            phase: Phase::Fresh,
        };
        engine.start(pool);
        engine
    }

    /// Deal a fresh round from `pool`, discarding all round state
    ///
    /// An empty pool is replaced by the built-in fallback deck. When the pool
    /// holds fewer than `HAND_SIZE` cards the hand takes all of them.
    pub fn start(&mut self, pool: &[CardSpec]) {
        self.pool = if pool.is_empty() {
            debug!("Empty card pool, using the built-in deck");
            fallback_pool()
        } else {
            pool.to_vec()
        };
        self.deal();
    }

    /// Deal a fresh round from the current pool
    pub fn restart(&mut self) {
        self.deal();
    }

    fn deal(&mut self) {
        let mut deck = shuffled(&build_deck(&self.pool), &mut self.rng);
        let hand_size = HAND_SIZE.min(deck.len());

        self.hand = deck.drain(..hand_size).collect();
        self.deck = deck;
        self.selection.clear();
        self.final_hand.clear();
        self.phase = Phase::Fresh;

        debug!(
            "Dealt {} cards, {} left in deck",
            self.hand.len(),
            self.deck.len()
        );
    }

    /// Flip the exchange mark on hand card `index`; returns whether it is now marked
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool, MulliganError> {
        if self.phase == Phase::Resolved {
            return Err(MulliganError::AlreadyResolved { index });
        }
        if index >= self.hand.len() {
            return Err(MulliganError::IndexOutOfRange {
                index,
                len: self.hand.len(),
            });
        }

        if self.selection.remove(&index) {
            Ok(false)
        } else {
            self.selection.insert(index);
            Ok(true)
        }
    }

    /// Resolve the exchange and return the final hand
    ///
    /// Unmarked cards are kept in order, marked cards go back into the deck,
    /// the deck is reshuffled and one replacement per marked card is appended.
    /// Calling this again before a restart changes nothing.
    pub fn confirm(&mut self) -> &[CardInstance] {
        if self.phase == Phase::Resolved {
            return &self.final_hand;
        }

        let mut kept = Vec::with_capacity(self.hand.len());
        let mut returned = Vec::with_capacity(self.selection.len());
        for (i, card) in self.hand.iter().enumerate() {
            if self.selection.contains(&i) {
                returned.push(card.clone());
            } else {
                kept.push(card.clone());
            }
        }

        let mut pool = std::mem::take(&mut self.deck);
        pool.extend(returned);
        let mut pool = shuffled(&pool, &mut self.rng);

        let n = self.selection.len();
        let remainder = pool.split_off(n);
        kept.extend(pool);

        self.final_hand = kept;
        self.deck = remainder;
        self.phase = Phase::Resolved;

        debug!(
            "Exchanged {} cards, {} left in deck",
            n,
            self.deck.len()
        );

        &self.final_hand
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Opening hand of the current round
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    /// Marked hand indices in ascending order
    pub fn selected(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Final hand, once the round is resolved
    pub fn final_hand(&self) -> Option<&[CardInstance]> {
        match self.phase {
            Phase::Resolved => Some(&self.final_hand),
            Phase::Fresh => None,
        }
    }

    pub fn deck(&self) -> &[CardInstance] {
        &self.deck
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Pool the current round was dealt from
    pub fn pool(&self) -> &[CardSpec] {
        &self.pool
    }
}
