//! Parsing collector output into an ordered size table.
//!
//! Each collector line has the shape `size<TAB>path`. The table keeps entries
//! in the order the collector reported them; a repeated path overwrites the
//! earlier size but keeps the earlier position.

use crate::error::{DuError, Result};

/// A single path and its size in bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeEntry {
    /// Path as reported by the collector
    pub path: String,

    /// Size in bytes
    pub size: u64,
}

impl SizeEntry {
    /// Parse one `size<TAB>path` line, multiplying the size by `block_size`.
    ///
    /// # Errors
    ///
    /// Returns [`DuError::MalformedEntry`] if the line does not contain exactly
    /// one tab, the size is not a non-negative integer, the path is empty, or
    /// the scaled size overflows `u64`.
    pub fn parse(line: &str, block_size: u64) -> Result<Self> {
        let mut fields = line.split('\t');

        let (Some(size_str), Some(path), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(DuError::malformed(line, "expected exactly one tab"));
        };

        let raw: u64 = size_str.trim().parse().map_err(|_| {
            DuError::malformed(line, format!("size {size_str:?} is not a non-negative integer"))
        })?;

        if path.is_empty() {
            return Err(DuError::malformed(line, "path is empty"));
        }

        let size = raw
            .checked_mul(block_size)
            .ok_or_else(|| DuError::malformed(line, format!("size overflow: {raw} * {block_size}")))?;

        Ok(Self {
            path: path.to_string(),
            size,
        })
    }
}

/// Ordered mapping from path to size in bytes.
///
/// Built once from collector output and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeTable(Vec<SizeEntry>);

impl SizeTable {
    /// Build a table from raw lines whose sizes are already in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DuError::MalformedEntry`] on the first line that does not parse.
    pub fn build<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_scaled(lines, 1)
    }

    /// Build a table from raw lines whose sizes are in units of `block_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DuError::MalformedEntry`] on the first line that does not parse.
    pub fn build_scaled<I, S>(lines: I, block_size: u64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<SizeEntry> = Vec::new();

        for line in lines {
            let entry = SizeEntry::parse(line.as_ref(), block_size)?;

            match entries.iter_mut().find(|e| e.path == entry.path) {
                Some(existing) => {
                    log::debug!("Duplicate path {}, keeping the later size", entry.path);
                    existing.size = entry.size;
                }
                None => entries.push(entry),
            }
        }

        Ok(Self(entries))
    }

    /// Size recorded for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<u64> {
        self.0.iter().find(|e| e.path == path).map(|e| e.size)
    }

    /// Whether `path` is a key of the table.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in collector order.
    pub fn iter(&self) -> std::slice::Iter<'_, SizeEntry> {
        self.0.iter()
    }

    /// Entries in collector order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SizeEntry] {
        &self.0
    }

    /// Sum of all sizes, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, e| acc.saturating_add(e.size))
    }

    /// Largest single size, or 0 for an empty table.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.0.iter().map(|e| e.size).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a SizeTable {
    type Item = &'a SizeEntry;
    type IntoIter = std::slice::Iter<'a, SizeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(table: &SizeTable) -> Vec<&str> {
        table.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_build_preserves_order() {
        let table = SizeTable::build(["100\t/a", "200\t/a/b", "300\t/a/c"]).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(paths(&table), vec!["/a", "/a/b", "/a/c"]);
        assert_eq!(table.get("/a"), Some(100));
        assert_eq!(table.get("/a/b"), Some(200));
        assert_eq!(table.get("/a/c"), Some(300));
    }

    #[test]
    fn test_build_rejects_missing_tab() {
        let err = SizeTable::build(["100 /a"]).unwrap_err();
        assert!(matches!(err, DuError::MalformedEntry { .. }));
    }

    #[test]
    fn test_build_rejects_extra_tab() {
        let err = SizeTable::build(["100\t/a\textra"]).unwrap_err();
        assert!(matches!(err, DuError::MalformedEntry { .. }));
    }

    #[test]
    fn test_build_rejects_negative_size() {
        let err = SizeTable::build(["-5\t/a"]).unwrap_err();
        assert!(matches!(err, DuError::MalformedEntry { .. }));
    }

    #[test]
    fn test_build_rejects_non_numeric_size() {
        let err = SizeTable::build(["12K\t/a"]).unwrap_err();
        assert!(matches!(err, DuError::MalformedEntry { .. }));
    }

    #[test]
    fn test_build_rejects_empty_path() {
        let err = SizeTable::build(["12\t"]).unwrap_err();
        assert!(matches!(err, DuError::MalformedEntry { .. }));
    }

    #[test]
    fn test_malformed_line_aborts_whole_build() {
        let result = SizeTable::build(["100\t/a", "garbage", "300\t/a/c"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_path_last_write_wins_in_place() {
        let table = SizeTable::build(["1\t/a", "2\t/a/b", "3\t/a"]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(paths(&table), vec!["/a", "/a/b"]);
        assert_eq!(table.get("/a"), Some(3));
    }

    #[test]
    fn test_paths_with_spaces_are_kept_intact() {
        let table = SizeTable::build(["4\t/a/my dir"]).unwrap();
        assert_eq!(table.get("/a/my dir"), Some(4));
    }

    #[test]
    fn test_build_scaled_multiplies_sizes() {
        let table = SizeTable::build_scaled(["4\t/a/b", "12\t/a"], 1024).unwrap();

        assert_eq!(table.get("/a/b"), Some(4096));
        assert_eq!(table.get("/a"), Some(12_288));
    }

    #[test]
    fn test_build_scaled_overflow_is_malformed() {
        let line = format!("{}\t/a", u64::MAX);
        let err = SizeTable::build_scaled([line], 2).unwrap_err();
        assert!(matches!(err, DuError::MalformedEntry { .. }));
    }

    #[test]
    fn test_total_and_max() {
        let table = SizeTable::build(["600\t/root", "200\t/root/x", "400\t/root/y"]).unwrap();

        assert_eq!(table.total(), 1200);
        assert_eq!(table.max(), 600);
    }

    #[test]
    fn test_empty_table() {
        let table = SizeTable::build(Vec::<String>::new()).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.max(), 0);
        assert!(!table.contains("/a"));
    }
}
