//! Nucleotide composition and quality arithmetic.

use crate::error::{FastqError, Result};
use crate::util::round2;

/// Per-nucleotide totals over any number of sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NucleotideCounts {
    pub a: u64,
    pub c: u64,
    pub g: u64,
    pub t: u64,
    pub n: u64,
}

impl NucleotideCounts {
    /// Count one sequence, case-insensitively. Any symbol outside
    /// `ACGTN` aborts with `InvalidNucleotide`; counts already added from
    /// this sequence are kept, so callers discard `self` on error.
    pub fn add_sequence(&mut self, seq: &str, id: &str) -> Result<()> {
        for ch in seq.chars() {
            match ch {
                'A' | 'a' => self.a += 1,
                'C' | 'c' => self.c += 1,
                'G' | 'g' => self.g += 1,
                'T' | 't' => self.t += 1,
                'N' | 'n' => self.n += 1,
                other => {
                    return Err(FastqError::InvalidNucleotide {
                        found: other,
                        id: Some(id.to_string()),
                    });
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.a + self.c + self.g + self.t + self.n
    }

    /// GC percentage of the non-N bases, two decimals. Zero when there are none.
    pub fn gc_content(&self) -> f64 {
        let called = self.total() - self.n;
        if called == 0 {
            return 0.0;
        }
        round2((self.g + self.c) as f64 / called as f64 * 100.0)
    }

    /// Complement of [`gc_content`](Self::gc_content); zero when there are no non-N bases.
    pub fn at_content(&self) -> f64 {
        if self.total() == self.n {
            return 0.0;
        }
        round2(100.0 - self.gc_content())
    }
}

/// Mean character code of a quality string, two decimals. Empty strings average 0.
pub fn mean_quality(qual: &str) -> f64 {
    let (sum, n) = qual
        .chars()
        .fold((0u64, 0u64), |(sum, n), c| (sum + u64::from(u32::from(c)), n + 1));
    if n == 0 {
        return 0.0;
    }
    round2(sum as f64 / n as f64)
}

/// Whole percentage computed as `round2(part / whole) * 100`: the fraction is
/// rounded before scaling. Zero when `whole` is zero.
pub fn coarse_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (round2(part as f64 / whole as f64) * 100.0).round()
}
