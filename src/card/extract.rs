//! Deck-document extraction.
//!
//! Turns the deck-code API response into a sorted list of [`CardSpec`]s:
//!
//! ```json
//! { "data": {
//!     "card_details":  { "<id>": { "common": { "cost": 2, "name": "<b>Nono</b>" } } },
//!     "deck_card_num": { "<id>": 3 } } }
//! ```
//!
//! Names with equal cost are ordered by plain string comparison (Unicode
//! code points), not by locale collation.

use crate::card::types::CardSpec;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Card {0} is listed in the deck but has no details")]
    UnknownCard(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Parse a raw deck document
pub fn parse_deck_document(text: &str) -> Result<Vec<CardSpec>, ParseError> {
    let json: Value = serde_json::from_str(text)?;
    extract_deck_list(&json)
}

/// Load and parse a deck document from disk
pub fn load_deck_document(path: &str) -> Result<Vec<CardSpec>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_deck_document(&content)
}

/// Extract the deck list, sorted by ascending cost then name
pub fn extract_deck_list(json: &Value) -> Result<Vec<CardSpec>, ParseError> {
    let data = field(json, "data", "data")?;
    let details = field(data, "card_details", "data.card_details")?;
    let counts = field(data, "deck_card_num", "data.deck_card_num")?
        .as_object()
        .ok_or_else(|| invalid("data.deck_card_num", "expected an object"))?;

    let mut list = Vec::with_capacity(counts.len());
    for (card_id, count) in counts {
        let common = details
            .get(card_id)
            .ok_or_else(|| ParseError::UnknownCard(card_id.clone()))?;
        let path = format!("data.card_details.{}.common", card_id);
        let common = field(common, "common", &path)?;

        let cost = as_i32(field(common, "cost", &format!("{}.cost", path))?, "cost")?;
        let raw_name = field(common, "name", &format!("{}.name", path))?
            .as_str()
            .ok_or_else(|| invalid("name", "expected a string"))?;
        let count = as_i32(count, "deck_card_num")?;

        list.push(CardSpec::new(cost, strip_html(raw_name), count));
    }

    list.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.name.cmp(&b.name)));
    Ok(list)
}

/// Drop markup tags, decode the common entities and trim
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
            }
            continue;
        }

        let opens_tag = ch == '<'
            && chars
                .peek()
                .map_or(false, |next| next.is_ascii_alphabetic() || *next == '/' || *next == '!');
        if opens_tag {
            in_tag = true;
        } else {
            out.push(ch);
        }
    }

    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

fn field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value, ParseError> {
    value
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ParseError::MissingField(path.to_string()))
}

fn as_i32(value: &Value, name: &str) -> Result<i32, ParseError> {
    let n = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    n.and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| invalid(name, &format!("'{}' is not a valid integer", value)))
}

fn invalid(field: &str, reason: &str) -> ParseError {
    ParseError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
