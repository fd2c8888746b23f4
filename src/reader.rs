use crate::error::FastqError;
use crate::util::looks_like_gzip;

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const LINES_PER_RECORD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

impl Source {
    pub(crate) fn error_path(&self) -> PathBuf {
        match self {
            Source::Path(p) => p.clone(),
            Source::Reader => PathBuf::from("<reader>"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Reader => f.write_str("<reader>"),
        }
    }
}

/// One group of up to four trimmed lines, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: String,
    pub seq: String,
    pub strand: String,
    pub qual: String,
    /// Lines actually present; less than 4 only for the last group of a file.
    pub found: usize,
    /// 1-based line number of the id line.
    pub line: u64,
}

impl RawRecord {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.found == LINES_PER_RECORD
    }
}

/// Groups FASTQ text (plain or .gz) into raw 4-line records.
///
/// Every line is whitespace-trimmed and decoded lossily, so stray bytes
/// surface as U+FFFD for validation to reject. Blank lines after the last
/// complete group are dropped; blank lines elsewhere count as lines.
pub struct FastqReader {
    src: Source,
    rdr: Box<dyn BufRead + Send>,
    line_num: u64,
    pending_blanks: u64,
    pending_line: Option<String>,
}

impl FastqReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| FastqError::io_err(e, path))?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(256 * 1024, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(FastqError::io_err(
                    io::Error::new(io::ErrorKind::Unsupported, "gzip support not enabled"),
                    path,
                ));
            }
        } else {
            Box::new(BufReader::with_capacity(256 * 1024, f))
        };

        Ok(Self {
            src: Source::Path(path.to_path_buf()),
            rdr,
            line_num: 0,
            pending_blanks: 0,
            pending_line: None,
        })
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            src: Source::Reader,
            rdr: Box::new(reader),
            line_num: 0,
            pending_blanks: 0,
            pending_line: None,
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    pub fn into_source(self) -> Source {
        self.src
    }

    /// Next raw group, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>, FastqError> {
        let Some(id) = self.next_line(true)? else {
            return Ok(None);
        };
        let line = self.line_num;
        let mut rest: [String; 3] = Default::default();
        let mut found = 1;
        for slot in rest.iter_mut() {
            match self.next_line(false)? {
                Some(l) => {
                    *slot = l;
                    found += 1;
                }
                None => break,
            }
        }
        let [seq, strand, qual] = rest;
        Ok(Some(RawRecord {
            id,
            seq,
            strand,
            qual,
            found,
            line,
        }))
    }

    fn next_line(&mut self, at_boundary: bool) -> Result<Option<String>, FastqError> {
        let line = self
            .fetch_line(at_boundary)
            .map_err(|e| FastqError::io_err(e, self.src.error_path()))?;
        if line.is_some() {
            self.line_num += 1;
        }
        Ok(line)
    }

    // At a group boundary, blank lines are held back until a non-blank line
    // proves they are not trailing. Inside an open group every line counts.
    fn fetch_line(&mut self, at_boundary: bool) -> io::Result<Option<String>> {
        if self.pending_blanks > 0 {
            self.pending_blanks -= 1;
            return Ok(Some(String::new()));
        }
        if let Some(l) = self.pending_line.take() {
            return Ok(Some(l));
        }
        let mut buf = Vec::with_capacity(256);
        loop {
            buf.clear();
            if self.rdr.read_until(b'\n', &mut buf)? == 0 {
                self.pending_blanks = 0;
                return Ok(None);
            }
            // invalid UTF-8 is left for record validation to reject
            let text = String::from_utf8_lossy(&buf);
            let trimmed = text.trim();
            if trimmed.is_empty() && at_boundary {
                self.pending_blanks += 1;
                continue;
            }
            let l = trimmed.to_string();
            if self.pending_blanks > 0 {
                self.pending_blanks -= 1;
                self.pending_line = Some(l);
                return Ok(Some(String::new()));
            }
            return Ok(Some(l));
        }
    }
}

impl Iterator for FastqReader {
    type Item = Result<RawRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(text: &'static str) -> Vec<RawRecord> {
        FastqReader::from_bufread(text.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn groups_of_four_with_crlf_and_padding() {
        let g = groups("@r1\r\nACGT \r\n+\r\n!!!!\r\n@r2\nAC\n-\nII\n");
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].id, "@r1");
        assert_eq!(g[0].seq, "ACGT");
        assert_eq!(g[0].line, 1);
        assert_eq!(g[1].strand, "-");
        assert_eq!(g[1].qual, "II");
        assert_eq!(g[1].line, 5);
        assert!(g.iter().all(RawRecord::is_complete));
    }

    #[test]
    fn trailing_blank_lines_are_dropped() {
        let g = groups("@r1\nA\n+\n!\n\n\n  \n");
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn inner_blank_lines_still_count() {
        let g = groups("@r1\n\n+\n\n@r2\nA\n+\n!\n");
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].seq, "");
        assert_eq!(g[0].qual, "");
        assert_eq!(g[1].id, "@r2");
        assert_eq!(g[1].line, 5);
    }

    #[test]
    fn blank_lines_finishing_a_group_count() {
        let g = groups("@r1\nACGT\n+\n!!!!\n@r2\n\n+\n\n\n");
        assert_eq!(g.len(), 2);
        assert!(g[1].is_complete());
        assert_eq!(g[1].seq, "");
        assert_eq!(g[1].qual, "");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let g = FastqReader::from_bufread(&b"@r1\nAC\xffT\n+\n!!!!\n"[..])
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(g[0].seq, "AC\u{FFFD}T");
    }

    #[test]
    fn partial_trailing_group_is_emitted() {
        let g = groups("@r1\nA\n+\n!\n@r2\nAC\n");
        assert_eq!(g.len(), 2);
        assert!(!g[1].is_complete());
        assert_eq!(g[1].found, 2);
        assert_eq!(g[1].strand, "");
    }

    #[test]
    fn missing_path_is_io_failure() {
        match FastqReader::from_path("/nonexistent/reads.fastq") {
            Err(FastqError::IoFailure { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/reads.fastq"))
            }
            _ => panic!("expected IoFailure"),
        }
    }
}
