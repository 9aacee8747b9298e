//! Sorted key index for correlating two large data files by a shared
//! identifier (e.g. microarray probe set ids) without linear scans.
//!
//! Keys and payloads live in two parallel vectors; the key vector is
//! kept in ascending order after every insertion. Insertion shifts the
//! tail of both vectors, which suits the intended workload of building
//! the index once from a reference file and then probing it once per
//! row of a second, larger file.
//!
//! ```
//! use tab_util::sorted_index::{Feature, SortedIndex};
//!
//! let mut index = SortedIndex::new();
//! index.insert_feature("p1", "chr1", "100", "200");
//! index.insert_feature("p3", "chr2", "300", "400");
//! index.insert_feature("p2", "chr1", "500", "600");
//!
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.lookup("p2"), Some(&Feature::new("chr1", "500", "600")));
//! assert_eq!(index.lookup("p4"), None);
//! ```

use crate::common_io::open_buf_reader;
use crate::error::{Result, TabError};
use crate::table::COMMENT_MARKER;

use std::io::BufRead;

/// Genomic location of a feature (probe set, exon, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    pub chrom: Box<str>,
    pub start: Box<str>,
    pub end: Box<str>,
}

impl Feature {
    pub fn new(chrom: &str, start: &str, end: &str) -> Self {
        Feature {
            chrom: chrom.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)
    }
}

#[derive(Debug, Clone)]
pub struct SortedIndex<P> {
    keys: Vec<Box<str>>,
    payloads: Vec<P>,
}

impl<P> Default for SortedIndex<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SortedIndex<P> {
    pub fn new() -> Self {
        SortedIndex {
            keys: vec![],
            payloads: vec![],
        }
    }

    /// Leftmost position where `key` could go with the keys still sorted
    fn lower_bound(&self, key: &str) -> usize {
        self.keys.partition_point(|x| **x < *key)
    }

    /// Insert at the leftmost sorted position for `key`. Duplicate
    /// keys are kept; a newer duplicate lands in front of older ones.
    pub fn insert(&mut self, key: &str, payload: P) {
        let i = self.lower_bound(key);
        self.keys.insert(i, key.into());
        self.payloads.insert(i, payload);
    }

    /// Payload at the leftmost position holding `key`.
    ///
    /// With duplicate keys only that one payload is reachable.
    pub fn lookup(&self, key: &str) -> Option<&P> {
        let i = self.lower_bound(key);
        match self.keys.get(i) {
            Some(k) if **k == *key => self.payloads.get(i),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> &[Box<str>] {
        &self.keys
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &P)> {
        self.keys.iter().map(|x| &**x).zip(self.payloads.iter())
    }
}

impl SortedIndex<Feature> {
    pub fn insert_feature(&mut self, key: &str, chrom: &str, start: &str, end: &str) {
        self.insert(key, Feature::new(chrom, start, end));
    }

    /// Build from a BED-like file with columns `chrom start end id`,
    /// keyed by `id`. Blank and `#` lines are skipped.
    pub fn from_bed_path(input_file: &str) -> Result<Self> {
        Self::from_bed_reader(open_buf_reader(input_file)?)
    }

    pub fn from_bed_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut ret = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.trim_start().starts_with(COMMENT_MARKER) {
                continue;
            }
            let words: Vec<&str> = line.split('\t').collect();
            if words.len() < 4 {
                return Err(TabError::Parse {
                    line: i + 1,
                    expected: 4,
                    actual: words.len(),
                });
            }
            ret.insert_feature(words[3].trim(), words[0], words[1], words[2]);
        }
        Ok(ret)
    }
}

impl<K, P> FromIterator<(K, P)> for SortedIndex<P>
where
    K: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}

impl<K, P> Extend<(K, P)> for SortedIndex<P>
where
    K: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (k, p) in iter {
            self.insert(k.as_ref(), p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_stay_sorted() {
        let index: SortedIndex<i32> = [("b", 1), ("a", 2), ("c", 3)].into_iter().collect();
        let keys: Vec<&str> = index.keys().iter().map(|x| &**x).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(index.lookup("a"), Some(&2));
        assert_eq!(index.lookup("b"), Some(&1));
        assert_eq!(index.lookup("c"), Some(&3));
    }

    #[test]
    fn test_missing_keys() {
        let index: SortedIndex<usize> = [("a", 0), ("m", 1), ("z", 2)].into_iter().collect();
        // below the minimum, in a gap, above the maximum
        assert_eq!(index.lookup("0"), None);
        assert_eq!(index.lookup("b"), None);
        assert_eq!(index.lookup("n"), None);
        assert_eq!(index.lookup("zz"), None);
        assert!(!index.contains_key(""));
        assert!(SortedIndex::<usize>::new().lookup("a").is_none());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut index = SortedIndex::new();
        index.insert("k", "first");
        index.insert("j", "other");
        index.insert("k", "second");
        assert_eq!(index.len(), 3);
        assert_eq!(index.keys().len(), 3);
        // leftmost match only
        assert_eq!(index.lookup("k"), Some(&"second"));
        let entries: Vec<_> = index.iter().collect();
        assert_eq!(entries, vec![("j", &"other"), ("k", &"second"), ("k", &"first")]);
    }

    #[test]
    fn test_many_random_order() {
        let mut index = SortedIndex::new();
        let ids: Vec<String> = (0..500).map(|i| format!("{}", (i * 7919) % 1000)).collect();
        for (i, id) in ids.iter().enumerate() {
            index.insert(id, i);
        }
        assert!(index.keys().windows(2).all(|w| w[0] <= w[1]));
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(index.lookup(id), Some(&i));
        }
    }

    #[test]
    fn test_features_from_bed() -> Result<()> {
        let data = "# probesets\nchr1\t1788\t2030\t2315101\nchr2\t10\t20\t2315100\n\n";
        let index = SortedIndex::from_bed_reader(data.as_bytes())?;
        assert_eq!(index.len(), 2);
        assert_eq!(&*index.keys()[0], "2315100");
        assert_eq!(
            index.lookup("2315101"),
            Some(&Feature::new("chr1", "1788", "2030"))
        );
        assert_eq!(index.lookup("2315101").unwrap().to_string(), "chr1\t1788\t2030");

        let bad = "chr1\t1\t2\n";
        assert!(matches!(
            SortedIndex::from_bed_reader(bad.as_bytes()),
            Err(TabError::Parse { line: 1, .. })
        ));
        Ok(())
    }
}
