//! In-memory FASTQ record store with whole-file statistics.
//!
//! - Plain and `.gz` input (auto-detect), or any `BufRead`.
//! - Eager load: every record is validated and every aggregate computed
//!   before [`RecordStore::build`] returns; any bad record fails the load.
//! - Aggregates: nucleotide counts, GC/AT content (N excluded), average
//!   length, average quality, strand split, serialized size and page count.
//! - Read-only queries: wildcard pattern counts, quality cutoffs and
//!   uniform random picks with a caller-supplied RNG.

pub mod error;
pub mod policy;
pub mod query;
pub mod reader;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;
mod util;

pub use crate::error::{FastqError, Result};
pub use crate::policy::{LoadOptions, TrailingPolicy};
pub use crate::query::{Pattern, Query};
pub use crate::reader::{FastqReader, RawRecord, Source};
pub use crate::record::{Read, Strand};
pub use crate::report::{Report, char_to_code, code_to_char};
pub use crate::stats::NucleotideCounts;
pub use crate::store::{CHARS_PER_PAGE, RecordStore};
