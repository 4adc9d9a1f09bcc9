use crate::card::{CardInstance, CardSpec};
use log::warn;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeckError {
    #[error("Invalid card entry '{name}': cost {cost}, count {count}")]
    InvalidSpec { name: String, cost: i32, count: i32 },
}

/// Expand a pool into one instance per copy, in pool order
///
/// Entries with a non-positive count or a negative cost contribute no cards.
pub fn build_deck(pool: &[CardSpec]) -> Vec<CardInstance> {
    let mut deck = Vec::new();

    for spec in pool {
        if !spec.is_well_formed() {
            warn!(
                "Skipping card entry '{}' (cost {}, count {})",
                spec.name, spec.cost, spec.count
            );
            continue;
        }

        for _ in 0..spec.count {
            deck.push(spec.instance());
        }
    }

    deck
}

/// Reject the pool if any entry is malformed
pub fn validate_pool(pool: &[CardSpec]) -> Result<(), DeckError> {
    match pool.iter().find(|spec| !spec.is_well_formed()) {
        Some(spec) => Err(DeckError::InvalidSpec {
            name: spec.name.clone(),
            cost: spec.cost,
            count: spec.count,
        }),
        None => Ok(()),
    }
}
