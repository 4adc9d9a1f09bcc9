use crate::card::{extract, fallback_pool, load_pool_file, CardSpec};
use crate::simulation::deck::{validate_pool, DeckError};
use log::{info, warn};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Rejected card pool from {source_name}: {error}")]
    InvalidPool { source_name: String, error: DeckError },
}

/// Where the card pool comes from
#[derive(Debug, Clone, Default)]
pub struct PoolConfig {
    /// Deck-code API response saved to disk
    pub deck_json: Option<String>,
    /// JSON array of `{cost, name, count}`
    pub pool_file: Option<String>,
    /// Reject malformed entries instead of skipping them
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolSource {
    DeckDocument(String),
    PoolFile(String),
    Fallback,
}

impl fmt::Display for PoolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolSource::DeckDocument(path) => write!(f, "deck document {}", path),
            PoolSource::PoolFile(path) => write!(f, "pool file {}", path),
            PoolSource::Fallback => write!(f, "built-in deck"),
        }
    }
}

/// Pick the first usable pool: deck document, then pool file, then the built-in deck
///
/// Unreadable or empty sources fall through to the next one. Only strict
/// validation of a loaded pool is an error.
pub fn resolve_pool(config: &PoolConfig) -> Result<(PoolSource, Vec<CardSpec>), ConfigError> {
    if let Some(path) = &config.deck_json {
        match extract::load_deck_document(path) {
            Ok(pool) if !pool.is_empty() => {
                return checked(config, PoolSource::DeckDocument(path.clone()), pool)
            }
            Ok(_) => warn!("Deck document {} lists no cards", path),
            Err(e) => warn!("Failed to read deck document {}: {}", path, e),
        }
    }

    if let Some(path) = &config.pool_file {
        match load_pool_file(path) {
            Ok(pool) if !pool.is_empty() => {
                return checked(config, PoolSource::PoolFile(path.clone()), pool)
            }
            Ok(_) => warn!("Pool file {} is empty", path),
            Err(e) => warn!("Failed to read pool file {}: {}", path, e),
        }
    }

    info!("Using the built-in deck");
    Ok((PoolSource::Fallback, fallback_pool()))
}

fn checked(
    config: &PoolConfig,
    source: PoolSource,
    pool: Vec<CardSpec>,
) -> Result<(PoolSource, Vec<CardSpec>), ConfigError> {
    if config.strict {
        validate_pool(&pool).map_err(|error| ConfigError::InvalidPool {
            source_name: source.to_string(),
            error,
        })?;
    }
    info!("Loaded {} card entries from {}", pool.len(), source);
    Ok((source, pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(tag: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "mulligan-config-{}-{}.json",
            tag,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_is_fallback() {
        let (source, pool) = resolve_pool(&PoolConfig::default()).unwrap();
        assert_eq!(source, PoolSource::Fallback);
        assert_eq!(pool, fallback_pool());
    }

    #[test]
    fn test_missing_files_fall_back() {
        let config = PoolConfig {
            deck_json: Some("no/such/deck.json".to_string()),
            pool_file: Some("no/such/pool.json".to_string()),
            strict: true,
        };
        let (source, _) = resolve_pool(&config).unwrap();
        assert_eq!(source, PoolSource::Fallback);
    }

    #[test]
    fn test_pool_file_used() {
        let path = temp_file("pool", r#"[{"cost":1,"name":"X","count":4}]"#);
        let config = PoolConfig {
            pool_file: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let (source, pool) = resolve_pool(&config).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(source, PoolSource::PoolFile(_)));
        assert_eq!(pool, vec![CardSpec::new(1, "X", 4)]);
    }

    #[test]
    fn test_deck_document_wins_over_pool_file() {
        let deck = temp_file(
            "deck",
            r#"{"data":{"card_details":{"7":{"common":{"cost":3,"name":"Y"}}},"deck_card_num":{"7":2}}}"#,
        );
        let pool = temp_file("pool-2", r#"[{"cost":1,"name":"X","count":4}]"#);
        let config = PoolConfig {
            deck_json: Some(deck.to_string_lossy().into_owned()),
            pool_file: Some(pool.to_string_lossy().into_owned()),
            strict: false,
        };
        let (source, resolved) = resolve_pool(&config).unwrap();
        std::fs::remove_file(&deck).unwrap();
        std::fs::remove_file(&pool).unwrap();

        assert!(matches!(source, PoolSource::DeckDocument(_)));
        assert_eq!(resolved, vec![CardSpec::new(3, "Y", 2)]);
    }

    #[test]
    fn test_empty_pool_file_falls_back() {
        let path = temp_file("empty", "[]");
        let config = PoolConfig {
            pool_file: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let (source, _) = resolve_pool(&config).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(source, PoolSource::Fallback);
    }

    #[test]
    fn test_strict_rejects_malformed() {
        let path = temp_file("strict", r#"[{"cost":1,"name":"X","count":0}]"#);
        let lenient = PoolConfig {
            pool_file: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let strict = PoolConfig {
            strict: true,
            ..lenient.clone()
        };

        assert!(resolve_pool(&lenient).is_ok());
        let err = resolve_pool(&strict).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("'X'"));
    }
}
