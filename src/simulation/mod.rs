pub mod batch;
pub mod deck;
pub mod mulligan;

pub use batch::{run_batch, run_round, BatchConfig, BatchResults};
pub use deck::{build_deck, validate_pool, DeckError};
pub use mulligan::{MulliganEngine, MulliganError, Phase, HAND_SIZE};
