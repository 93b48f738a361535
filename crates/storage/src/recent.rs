use crate::files::safe_file_name;

pub const RECENT_SEPARATOR: char = '?';
pub const DEFAULT_MAX_RECENT: usize = 4;

/// Most-recently-used sprite paths, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFiles {
    entries: Vec<String>,
    capacity: usize,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECENT)
    }
}

impl RecentFiles {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Reads the persisted `?`-delimited form. Empty segments are skipped and
    /// only the newest `capacity` entries are kept.
    pub fn decode(encoded: &str, capacity: usize) -> Self {
        let mut recent = Self::new(capacity);
        for path in encoded.split(RECENT_SEPARATOR).filter(|p| !p.is_empty()) {
            recent.insert(path);
        }
        recent
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, path) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(RECENT_SEPARATOR);
            }
            out.push_str(path);
        }
        out
    }

    /// Records `path`. A path already in the list stays where it is; when
    /// full, the oldest entry is evicted. Returns whether the list changed.
    pub fn insert(&mut self, path: &str) -> bool {
        if path.is_empty() || path.contains(RECENT_SEPARATOR) {
            return false;
        }
        if self.entries.iter().any(|entry| entry == path) {
            return false;
        }
        while self.entries.len() >= self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(path.to_string());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(file name, full path)` pairs for menus.
    pub fn labelled(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|path| (safe_file_name(path), path.as_str()))
    }
}
