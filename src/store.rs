use crate::error::{FastqError, Result};
use crate::policy::{LoadOptions, TrailingPolicy};
use crate::reader::{FastqReader, RawRecord, Source};
use crate::record::{Read, Strand};
use crate::stats::{NucleotideCounts, coarse_percent, mean_quality};

use std::io::BufRead;
use std::path::Path;

/// Characters on one single-sided 8.5 x 11 page in 12-point font.
pub const CHARS_PER_PAGE: usize = 2812;

/// Immutable, fully loaded FASTQ file with every aggregate computed up front.
#[derive(Debug, Clone)]
pub struct RecordStore {
    src: Source,
    reads: Vec<Read>,
    counts: NucleotideCounts,
    gc: f64,
    at: f64,
    avg_len: f64,
    avg_quality: f64,
    plus: u32,
    minus: u32,
    total_chars: usize,
}

impl RecordStore {
    /// Load and validate the FASTQ file at `path` with default options.
    pub fn build<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build_with(path, LoadOptions::default())
    }

    pub fn build_with<P: AsRef<Path>>(path: P, opts: LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading {}", path.display());
        let reader = FastqReader::from_path(path)?;
        Self::from_reader(reader, &opts)
    }

    /// Load from any buffered text source (stdin, in-memory data, ...).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: LoadOptions) -> Result<Self> {
        Self::from_reader(FastqReader::from_bufread(reader), &opts)
    }

    fn from_reader(mut reader: FastqReader, opts: &LoadOptions) -> Result<Self> {
        log::info!("reading in sequences");
        let mut raw = Vec::new();
        while let Some(rec) = reader.next_record()? {
            if !rec.is_complete() {
                match opts.trailing {
                    TrailingPolicy::Reject => {
                        return Err(FastqError::IncompleteRecord {
                            id: rec.id,
                            found: rec.found,
                            line: rec.line,
                        });
                    }
                    TrailingPolicy::Validate => log::warn!(
                        "trailing record {} at line {} has only {} of 4 lines",
                        rec.id,
                        rec.line,
                        rec.found
                    ),
                }
            }
            raw.push(rec);
        }

        log::info!("verifying reads");
        let mut reads = raw.into_iter().map(verify).collect::<Result<Vec<_>>>()?;

        log::info!("counting nucleotides");
        let mut counts = NucleotideCounts::default();
        for r in &reads {
            counts.add_sequence(&r.seq, &r.id)?;
        }
        let gc = counts.gc_content();
        let at = counts.at_content();

        log::info!("assessing quality");
        for r in &mut reads {
            r.avg_quality = mean_quality(&r.qual);
        }

        let n = reads.len();
        let (avg_len, avg_quality) = if n == 0 {
            (0.0, 0.0)
        } else {
            let len_sum: usize = reads.iter().map(Read::len).sum();
            let qual_sum: f64 = reads.iter().map(Read::avg_quality).sum();
            (len_sum as f64 / n as f64, qual_sum / n as f64)
        };
        let plus_count = reads.iter().filter(|r| r.strand == Strand::Plus).count();
        let plus = coarse_percent(plus_count, n) as u32;
        let minus = if n == 0 { 0 } else { 100 - plus };

        log::info!("calculating total number of characters");
        let total_chars = reads.iter().map(Read::serialized_len).sum();

        log::debug!(
            "loaded {n} reads: {} nucleotides, GC {gc}%, AT {at}%, avg length {avg_len}, avg quality {avg_quality}, +{plus}% -{minus}%",
            counts.total()
        );

        Ok(Self {
            src: reader.into_source(),
            reads,
            counts,
            gc,
            at,
            avg_len,
            avg_quality,
            plus,
            minus,
            total_chars,
        })
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Reads in file order.
    pub fn reads(&self) -> &[Read] {
        &self.reads
    }

    pub fn num_reads(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn counts(&self) -> &NucleotideCounts {
        &self.counts
    }

    pub fn total_nucleotides(&self) -> u64 {
        self.counts.total()
    }

    pub fn gc_content(&self) -> f64 {
        self.gc
    }

    pub fn at_content(&self) -> f64 {
        self.at
    }

    pub fn avg_len(&self) -> f64 {
        self.avg_len
    }

    /// Mean of the per-read averages, unrounded.
    pub fn avg_quality(&self) -> f64 {
        self.avg_quality
    }

    pub fn plus_percent(&self) -> u32 {
        self.plus
    }

    pub fn minus_percent(&self) -> u32 {
        self.minus
    }

    /// Characters needed to write the whole file back out.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn page_count(&self) -> usize {
        self.page_count_with(CHARS_PER_PAGE)
    }

    pub fn page_count_with(&self, chars_per_page: usize) -> usize {
        if chars_per_page == 0 {
            return 0;
        }
        self.total_chars.div_ceil(chars_per_page)
    }
}

fn verify(rec: RawRecord) -> Result<Read> {
    // lengths in characters: a lossily decoded byte is still one symbol
    let (seq_len, qual_len) = (rec.seq.chars().count(), rec.qual.chars().count());
    if seq_len != qual_len {
        return Err(FastqError::RecordImbalance {
            id: rec.id,
            seq: seq_len,
            qual: qual_len,
            line: rec.line,
        });
    }
    let Some(strand) = Strand::from_marker(&rec.strand) else {
        return Err(FastqError::InvalidStrand {
            strand: rec.strand,
            id: rec.id,
            line: rec.line,
        });
    };
    Ok(Read {
        id: rec.id,
        seq: rec.seq,
        strand,
        qual: rec.qual,
        avg_quality: 0.0,
    })
}
