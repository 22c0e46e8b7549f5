use serde::{Deserialize, Deserializer, Serialize};

// GitHub issue-search response structures. Missing or null fields decode to
// their zero value so one sparse item never discards the whole page.

/// Top-level body of `GET /search/issues`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub incomplete_results: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

/// One pull request in the search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    repository_url: String,
    #[serde(deserialize_with = "null_as_default")]
    state: String,
}

impl Item {
    pub fn new(repository_url: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            state: state.into(),
        }
    }

    /// API URL of the repository the pull request was opened against
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Upstream state string (`open`, `closed`, ...), passed through as-is
    pub fn state(&self) -> &str {
        &self.state
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
