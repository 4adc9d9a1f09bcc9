pub mod extract;
pub mod pool;
pub mod types;

pub use extract::{extract_deck_list, parse_deck_document, ParseError};
pub use pool::{fallback_pool, format_pool, load_pool_file, total_cards, PoolError};
pub use types::{CardInstance, CardSpec};
