use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: String,
    /// Lookup key, e.g. `hvac`.
    pub name: String,
    /// Display name, e.g. `HVAC`.
    pub label: String,
    /// Base keywords in the order phrases are generated.
    pub keywords: Vec<String>,
}

impl Industry {
    pub fn is_hvac(&self) -> bool {
        is_hvac_name(&self.name)
    }
}

pub fn is_hvac_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("hvac")
}

/// Trims each keyword, drops blanks and exact repeats, keeps first-seen order.
pub fn clean_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref().trim();
        if !keyword.is_empty() && !cleaned.iter().any(|k| k == keyword) {
            cleaned.push(keyword.to_string());
        }
    }
    cleaned
}

#[derive(Debug, Clone, Default)]
pub struct UpdateIndustryRequest {
    pub label: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_keywords_trims_and_dedupes() {
        let cleaned = clean_keywords(["  AC repair ", "", "furnace repair", "AC repair"]);
        assert_eq!(cleaned, vec!["AC repair", "furnace repair"]);
    }

    #[test]
    fn hvac_name_is_case_insensitive() {
        assert!(is_hvac_name(" HVAC "));
        assert!(!is_hvac_name("plumbing"));
    }
}
