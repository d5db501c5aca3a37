use dashmap::DashSet;

/// The set of every URL the admission filter has evaluated
///
/// Grows monotonically for the lifetime of a crawl and is never pruned:
/// evicting entries would let a URL be admitted twice. Memory therefore
/// grows linearly with the number of distinct links seen, which is the
/// scaling limit of a single session.
///
/// Backed by a sharded concurrent set, so the check-and-insert for one URL
/// is atomic while unrelated URLs only contend when they share a shard.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: DashSet<String>,
}

impl SeenSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a normalized URL
    ///
    /// Returns `true` when this call inserted it, `false` if it was already
    /// present. Exactly one of any number of concurrent callers for the same
    /// URL observes `true`.
    pub fn insert(&self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    /// Returns true if the URL has been evaluated before
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Number of distinct URLs seen
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing has been seen yet
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
