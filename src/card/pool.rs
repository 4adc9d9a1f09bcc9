use crate::card::types::CardSpec;
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Built-in deck used when no external deck list is available
pub const FALLBACK_POOL: &[(i32, &str, i32)] = &[
    (1, "知恵の輝き", 3),
    (1, "ストームブラスト", 3),
    (2, "アドラブルティーチャー・ノノ", 3),
    (2, "真理の召喚", 2),
    (2, "虹の奇跡", 1),
    (3, "熾天使の福音", 3),
    (3, "理光の証明", 2),
    (3, "宿題やるですぅ！", 3),
    (5, "ワンダーウィッチ・エミル", 2),
    (5, "マナリアフレンズ・アン＆グレア", 3),
    (6, "マナリアの学徒・ウィリアム", 2),
    (7, "五行の果て・クオン", 3),
    (7, "鬼呼びの術", 3),
    (10, "最果ての罪・サタン", 1),
    (10, "ブレイズデストロイヤー", 3),
    (18, "オーバーディメンション", 3),
];

pub fn fallback_pool() -> Vec<CardSpec> {
    FALLBACK_POOL
        .iter()
        .map(|&(cost, name, count)| CardSpec::new(cost, name, count))
        .collect()
}

/// Load a pool from a JSON array of `{cost, name, count}` records
pub fn load_pool_file(path: &str) -> Result<Vec<CardSpec>, PoolError> {
    let content = std::fs::read_to_string(path)?;
    let pool: Vec<CardSpec> = serde_json::from_str(&content)?;
    Ok(pool)
}

/// Number of card instances the pool expands to (malformed entries count as zero)
pub fn total_cards(pool: &[CardSpec]) -> usize {
    pool.iter()
        .filter(|spec| spec.is_well_formed())
        .map(|spec| spec.count as usize)
        .sum()
}

/// One `{ cost: C, name: "N", count: K },` line per entry
pub fn format_pool(pool: &[CardSpec]) -> String {
    let mut out = String::new();
    for spec in pool {
        let _ = writeln!(
            out,
            "{{ cost: {}, name: \"{}\", count: {} }},",
            spec.cost, spec.name, spec.count
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_pool_has_forty_cards() {
        let pool = fallback_pool();
        assert_eq!(pool.len(), 16);
        assert_eq!(total_cards(&pool), 40);
        assert!(pool.iter().all(CardSpec::is_well_formed));
    }

    #[test]
    fn test_fallback_pool_sorted_by_cost() {
        let pool = fallback_pool();
        assert!(pool.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn test_total_cards_skips_malformed() {
        let pool = vec![
            CardSpec::new(1, "A", 2),
            CardSpec::new(1, "B", 0),
            CardSpec::new(-2, "C", 3),
            CardSpec::new(4, "D", -1),
        ];
        assert_eq!(total_cards(&pool), 2);
    }

    #[test]
    fn test_format_pool() {
        let pool = vec![CardSpec::new(1, "X", 4), CardSpec::new(2, "Y", 1)];
        assert_eq!(
            format_pool(&pool),
            "{ cost: 1, name: \"X\", count: 4 },\n{ cost: 2, name: \"Y\", count: 1 },\n"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_pool_file("definitely/not/here.json");
        assert!(matches!(result, Err(PoolError::IoError(_))));
    }

    #[test]
    fn test_load_pool_file() {
        let path = std::env::temp_dir().join(format!("mulligan-pool-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"cost":1,"name":"X","count":4}]"#).unwrap();
        let pool = load_pool_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(pool, vec![CardSpec::new(1, "X", 4)]);
    }
}
