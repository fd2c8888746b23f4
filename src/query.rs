//! Read-only queries over a loaded [`RecordStore`].

use crate::error::{FastqError, Result};
use crate::record::Read;
use crate::stats::coarse_percent;
use crate::store::RecordStore;

use rand::Rng;

/// Nucleotide pattern where `N` matches any single symbol.
///
/// Only the pattern side is case-normalized; sequences are compared as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    symbols: Vec<u8>,
}

impl Pattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let upper = pattern.to_ascii_uppercase();
        if let Some(bad) = upper
            .chars()
            .find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T' | 'N'))
        {
            return Err(FastqError::InvalidNucleotide {
                found: bad,
                id: None,
            });
        }
        Ok(Self {
            symbols: upper.into_bytes(),
        })
    }

    pub fn as_str(&self) -> &str {
        // only ASCII letters survive parse
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True if the pattern occurs at any offset of `seq`. An empty pattern
    /// occurs everywhere.
    pub fn is_match(&self, seq: &[u8]) -> bool {
        self.find(seq).is_some()
    }

    /// Offset of the first occurrence in `seq`.
    pub fn find(&self, seq: &[u8]) -> Option<usize> {
        let m = self.symbols.len();
        if m > seq.len() {
            return None;
        }
        (0..=seq.len() - m).find(|&i| self.matches_at(&seq[i..i + m]))
    }

    #[inline]
    fn matches_at(&self, window: &[u8]) -> bool {
        self.symbols
            .iter()
            .zip(window)
            .all(|(&p, &s)| p == b'N' || p == s)
    }
}

/// Borrowed, stateless view answering questions about a store.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    store: &'a RecordStore,
}

impl<'a> Query<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a RecordStore {
        self.store
    }

    /// Number of reads containing `pattern` at least once.
    pub fn count_matches(&self, pattern: &str) -> Result<usize> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.count_pattern(&pattern))
    }

    pub fn count_pattern(&self, pattern: &Pattern) -> usize {
        self.store
            .reads()
            .iter()
            .filter(|r| pattern.is_match(r.seq.as_bytes()))
            .count()
    }

    /// Share of reads containing `pattern`, as a whole percentage.
    pub fn match_percent(&self, pattern: &str) -> Result<f64> {
        let n = self.count_matches(pattern)?;
        Ok(coarse_percent(n, self.store.num_reads()))
    }

    /// Number of reads whose average quality is at or above the code of `cutoff`.
    /// `cutoff` must be exactly one character.
    pub fn count_at_or_above(&self, cutoff: &str) -> Result<usize> {
        let code = cutoff_code(cutoff)?;
        Ok(self
            .store
            .reads()
            .iter()
            .filter(|r| r.avg_quality() >= code)
            .count())
    }

    pub fn at_or_above_percent(&self, cutoff: &str) -> Result<f64> {
        let n = self.count_at_or_above(cutoff)?;
        Ok(coarse_percent(n, self.store.num_reads()))
    }

    /// One read drawn uniformly from the store; `None` if it is empty.
    /// Every call is an independent draw.
    pub fn pick_random<R: Rng>(&self, rng: &mut R) -> Option<&'a Read> {
        let reads = self.store.reads();
        if reads.is_empty() {
            return None;
        }
        Some(&reads[rng.random_range(0..reads.len())])
    }

    pub fn pick_random_thread(&self) -> Option<&'a Read> {
        self.pick_random(&mut rand::rng())
    }
}

impl RecordStore {
    pub fn query(&self) -> Query<'_> {
        Query::new(self)
    }
}

fn cutoff_code(cutoff: &str) -> Result<f64> {
    let mut chars = cutoff.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(f64::from(u32::from(c))),
        _ => Err(FastqError::InvalidInput(
            "quality score cutoff must be exactly one character".into(),
        )),
    }
}
