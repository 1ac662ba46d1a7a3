use dashmap::DashMap;

/// In-memory map from article URL to store identifier.
///
/// The legacy article text call only carries a URL while the store needs an
/// identifier, so every listed or inserted bookmark is remembered here.
/// Entries never expire; re-listing refreshes them. Safe to share between
/// concurrent requests.
#[derive(Debug, Default)]
pub struct UrlIdCache {
    entries: DashMap<String, String>,
}

impl UrlIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins.
    pub fn record(&self, url: &str, id: &str) {
        self.entries.insert(url.to_string(), id.to_string());
    }

    pub fn lookup(&self, url: &str) -> Option<String> {
        self.entries.get(url).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
