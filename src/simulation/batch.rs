use crate::card::{CardInstance, CardSpec};
use crate::simulation::mulligan::MulliganEngine;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Settings for a batch of automated mulligans
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub num_games: usize,
    /// Every opening-hand card with cost >= this is exchanged
    pub exchange_min_cost: i32,
    /// Round `i` is seeded with `base_seed + i`
    pub base_seed: u64,
    /// Card name whose presence in the final hand is tracked
    pub target: Option<String>,
}

/// Outcome of one automated round
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub exchanged: usize,
    pub final_hand: Vec<CardInstance>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchResults {
    pub num_games: usize,
    pub total_exchanged: usize,
    /// Card name -> number of rounds whose final hand held at least one copy
    pub appearances: HashMap<String, usize>,
    pub target_hits: Option<usize>,
}

impl BatchResults {
    pub fn avg_exchanged(&self) -> f64 {
        if self.num_games == 0 {
            return 0.0;
        }
        self.total_exchanged as f64 / self.num_games as f64
    }

    /// Fraction of rounds holding `name` after the mulligan
    pub fn hold_rate(&self, name: &str) -> f64 {
        if self.num_games == 0 {
            return 0.0;
        }
        self.appearances.get(name).copied().unwrap_or(0) as f64 / self.num_games as f64
    }

    /// Appearance counts, most frequent first, ties by name
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self
            .appearances
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Play one round, exchanging every card that costs at least `exchange_min_cost`
pub fn run_round(pool: &[CardSpec], seed: u64, exchange_min_cost: i32) -> RoundResult {
    let mut engine = MulliganEngine::with_seed(pool, Some(seed));

    let picks: Vec<usize> = engine
        .hand()
        .iter()
        .enumerate()
        .filter(|(_, card)| card.cost >= exchange_min_cost)
        .map(|(i, _)| i)
        .collect();
    for &i in &picks {
        // indices come from the hand itself
        let toggled = engine.toggle_selection(i);
        debug_assert_eq!(toggled, Ok(true));
    }

    let final_hand = engine.confirm().to_vec();
    RoundResult {
        exchanged: picks.len(),
        final_hand,
    }
}

/// Run `config.num_games` rounds in parallel and aggregate them
pub fn run_batch(
    pool: &[CardSpec],
    config: &BatchConfig,
    progress: Option<&ProgressBar>,
) -> BatchResults {
    let rounds: Vec<RoundResult> = (0..config.num_games)
        .into_par_iter()
        .map(|i| {
            let result = run_round(pool, config.base_seed.wrapping_add(i as u64), config.exchange_min_cost);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            result
        })
        .collect();

    let mut results = BatchResults {
        num_games: config.num_games,
        target_hits: config.target.as_ref().map(|_| 0),
        ..Default::default()
    };

    for round in &rounds {
        results.total_exchanged += round.exchanged;

        let held: HashSet<&str> = round.final_hand.iter().map(|c| c.name.as_str()).collect();
        for name in &held {
            *results.appearances.entry(name.to_string()).or_insert(0) += 1;
        }

        if let (Some(target), Some(hits)) = (&config.target, results.target_hits.as_mut()) {
            if held.contains(target.as_str()) {
                *hits += 1;
            }
        }
    }

    results
}
