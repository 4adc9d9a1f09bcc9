pub mod card;
pub mod cli;
pub mod config;
pub mod rng;
pub mod simulation;
