//! Human-readable summaries of a [`RecordStore`].
//!
//! Every method returns a finished text block so a front end only has to
//! print it. Query-backed blocks propagate the query's error unchanged.

use crate::error::{FastqError, Result};
use crate::query::Query;
use crate::stats::coarse_percent;
use crate::store::RecordStore;

use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Printable quality codes, `!` through `~`.
pub const PRINTABLE_CODES: RangeInclusive<u32> = 33..=126;

/// Character for a printable quality code.
pub fn code_to_char(code: u32) -> Result<char> {
    if !PRINTABLE_CODES.contains(&code) {
        return Err(FastqError::InvalidInput(format!(
            "number must be between {} and {}",
            PRINTABLE_CODES.start(),
            PRINTABLE_CODES.end()
        )));
    }
    char::from_u32(code).ok_or_else(|| FastqError::InvalidInput(format!("no character for {code}")))
}

/// Code of a single character; surrounding whitespace is ignored.
pub fn char_to_code(input: &str) -> Result<u32> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(u32::from(c)),
        _ => Err(FastqError::InvalidInput("please enter a single character".into())),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    store: &'a RecordStore,
}

impl<'a> Report<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    fn query(&self) -> Query<'a> {
        self.store.query()
    }

    pub fn num_reads(&self) -> String {
        format!("{} total reads", self.store.num_reads())
    }

    pub fn avg_read_length(&self) -> String {
        format!("Average read length: {:.2} nucleotides", self.store.avg_len())
    }

    /// File average quality rounded to a whole code and shown as its character.
    pub fn avg_quality_char(&self) -> Option<char> {
        if self.store.is_empty() {
            return None;
        }
        char::from_u32(self.store.avg_quality().round() as u32)
    }

    pub fn avg_quality(&self) -> String {
        match self.avg_quality_char() {
            Some(c) => format!(
                "Average quality score: {c} ({:.2})",
                self.store.avg_quality()
            ),
            None => "Average quality score: n/a (no reads)".to_string(),
        }
    }

    pub fn nucleotide_counts(&self) -> String {
        let c = self.store.counts();
        format!(
            "NUMBER OF EACH NUCLEOTIDE SEEN IN ALL READS\nA: {}\nC: {}\nG: {}\nT: {}\nN: {}\nTotal: {}",
            c.a,
            c.c,
            c.g,
            c.t,
            c.n,
            c.total()
        )
    }

    pub fn gc_at(&self) -> String {
        format!(
            "G/C A/T CONTENT FOR ALL READS\nG/C Content: {:.2}%\nA/T Content: {:.2}%",
            self.store.gc_content(),
            self.store.at_content()
        )
    }

    pub fn strandedness(&self) -> String {
        format!(
            "STRANDEDNESS FOR ALL READS\nPositive Strand: {}%\nNegative Strand: {}%",
            self.store.plus_percent(),
            self.store.minus_percent()
        )
    }

    pub fn matches(&self, pattern: &str) -> Result<String> {
        let n = self.query().count_matches(pattern)?;
        Ok(format!(
            "\"{}\" found in {n} out of {} sequences\n({}%)",
            pattern.to_ascii_uppercase(),
            self.store.num_reads(),
            coarse_percent(n, self.store.num_reads())
        ))
    }

    pub fn quality_threshold(&self, cutoff: &str) -> Result<String> {
        let n = self.query().count_at_or_above(cutoff)?;
        Ok(format!(
            "{n} of {} sequences have an average quality score greater than or equal to \"{cutoff}\"\n({}%)",
            self.store.num_reads(),
            coarse_percent(n, self.store.num_reads())
        ))
    }

    pub fn pages(&self) -> String {
        format!(
            "It would take {} pages to write this FASTQ file in 12 point font",
            self.store.page_count()
        )
    }

    /// A random read exactly as it appeared in the file.
    pub fn random_read<R: Rng>(&self, rng: &mut R) -> Option<String> {
        self.query().pick_random(rng).map(ToString::to_string)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.store.source())?;
        writeln!(f, "{}\n", self.num_reads())?;
        writeln!(f, "{}\n", self.nucleotide_counts())?;
        writeln!(f, "{}\n", self.gc_at())?;
        writeln!(f, "{}\n", self.strandedness())?;
        writeln!(f, "{}", self.avg_read_length())?;
        writeln!(f, "{}", self.avg_quality())?;
        write!(f, "{}", self.pages())
    }
}

impl RecordStore {
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LoadOptions;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn store() -> RecordStore {
        RecordStore::from_bufread(
            "@r1\nACGTN\n+\nIIIII\n@r2\nGGCC\n-\n!!!!\n".as_bytes(),
            LoadOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn ascii_conversions() {
        assert_eq!(code_to_char(33).unwrap(), '!');
        assert_eq!(code_to_char(126).unwrap(), '~');
        assert!(matches!(code_to_char(32), Err(FastqError::InvalidInput(_))));
        assert!(matches!(code_to_char(127), Err(FastqError::InvalidInput(_))));
        assert_eq!(char_to_code(" I ").unwrap(), 73);
        assert!(char_to_code("  ").is_err());
        assert!(char_to_code("II").is_err());
    }

    #[test]
    fn static_blocks() {
        let s = store();
        let r = s.report();
        assert_eq!(r.num_reads(), "2 total reads");
        assert_eq!(r.avg_read_length(), "Average read length: 4.50 nucleotides");
        // (73 + 33) / 2 = 53 -> '5'
        assert_eq!(r.avg_quality_char(), Some('5'));
        assert!(r.nucleotide_counts().ends_with("N: 1\nTotal: 9"));
        assert!(r.gc_at().contains("G/C Content: 75.00%"));
        assert!(r.gc_at().contains("A/T Content: 25.00%"));
        assert!(r.strandedness().contains("Positive Strand: 50%"));
        assert!(r.pages().contains(" 1 pages"));
    }

    #[test]
    fn query_blocks() {
        let s = store();
        let r = s.report();
        assert_eq!(
            r.matches("ggn").unwrap(),
            "\"GGN\" found in 1 out of 2 sequences\n(50%)"
        );
        assert!(r.matches("GGZ").is_err());
        assert!(r.quality_threshold("I").unwrap().starts_with("1 of 2 sequences"));
        assert!(r.quality_threshold("").is_err());
    }

    #[test]
    fn random_read_is_file_text() {
        let s = store();
        let mut rng = SmallRng::seed_from_u64(7);
        let text = s.report().random_read(&mut rng).unwrap();
        assert!(text == "@r1\nACGTN\n+\nIIIII" || text == "@r2\nGGCC\n-\n!!!!");
    }

    #[test]
    fn summary_lists_every_block() {
        let text = store().report().to_string();
        assert!(text.starts_with("<reader>\n2 total reads"));
        assert!(text.contains("STRANDEDNESS"));
        assert!(text.ends_with("12 point font"));
    }
}
