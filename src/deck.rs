//! Deck file loading
//!
//! A deck is plain UTF-8 text with one card per line: a key, whitespace, a
//! value, and optionally anything else (notes) which is ignored. Blank lines
//! are skipped, so an empty file is a valid deck with no cards.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlashMatchError, Result};

/// One key-value pair from the deck file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    pub key: String,
    pub value: String,
}

/// Parse deck text. Line numbers in errors are 1-based.
pub fn parse_deck(text: &str) -> Result<Vec<DeckCard>> {
    let mut cards = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(key) = fields.next() else {
            continue;
        };
        let value = fields
            .next()
            .ok_or(FlashMatchError::MissingValue { line: i + 1 })?;
        cards.push(DeckCard {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(cards)
}

/// Read and parse a deck file
pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<DeckCard>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| FlashMatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cards = parse_deck(&text)?;
    log::info!("Loaded {} cards from {}", cards.len(), path.display());
    Ok(cards)
}
