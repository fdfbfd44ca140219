use std::collections::HashSet;

use crate::error::{Result, ScoutError};
use crate::models::Phrase;

/// Expands base keywords and cities into search phrases.
pub struct PhraseGenerator;

impl PhraseGenerator {
    /// For every keyword (outer) and city (inner), emits `"<keyword> <city>"`
    /// then `"<city> <keyword>"`, skipping any string already emitted.
    ///
    /// The result holds at most `2 * keywords * cities` phrases and is a pure
    /// function of the inputs.
    pub fn generate<K, C>(base_keywords: &[K], cities: &[C]) -> Result<Vec<Phrase>>
    where
        K: AsRef<str>,
        C: AsRef<str>,
    {
        if base_keywords.is_empty() {
            return Err(ScoutError::InvalidInput(
                "at least one base keyword is required".to_string(),
            ));
        }
        if cities.is_empty() {
            return Err(ScoutError::InvalidInput(
                "at least one city is required".to_string(),
            ));
        }

        let capacity = 2 * base_keywords.len() * cities.len();
        let mut seen: HashSet<Phrase> = HashSet::with_capacity(capacity);
        let mut phrases = Vec::with_capacity(capacity);

        for keyword in base_keywords {
            let keyword = keyword.as_ref();
            for city in cities {
                let city = city.as_ref();
                for candidate in [format!("{keyword} {city}"), format!("{city} {keyword}")] {
                    if seen.insert(candidate.clone()) {
                        phrases.push(candidate);
                    }
                }
            }
        }

        Ok(phrases)
    }
}
