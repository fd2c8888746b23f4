use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FastqError>;

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("can't read file \"{}\": {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "read id {id} (line {line}) has a different number of qscores ({qual}) and nucleotides ({seq})"
    )]
    RecordImbalance {
        id: String,
        seq: usize,
        qual: usize,
        line: u64,
    },
    #[error("unknown strand-sense \"{strand}\" in read id {id} (line {line})")]
    InvalidStrand {
        strand: String,
        id: String,
        line: u64,
    },
    #[error("unknown nucleotide \"{found}\"{}", in_read(.id))]
    InvalidNucleotide { found: char, id: Option<String> },
    #[error("incomplete record {id} at line {line}: expected 4 lines, found {found}")]
    IncompleteRecord { id: String, found: usize, line: u64 },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

fn in_read(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" in read id {id}"),
        None => String::new(),
    }
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// Query-time errors leave the store usable; construction errors do not.
    pub fn is_query_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::InvalidNucleotide { id, .. } => id.is_none(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nucleotide_message_names_read_when_known() {
        let err = FastqError::InvalidNucleotide {
            found: 'Z',
            id: Some("@r1".into()),
        };
        assert_eq!(err.to_string(), "unknown nucleotide \"Z\" in read id @r1");

        let err = FastqError::InvalidNucleotide { found: 'X', id: None };
        assert_eq!(err.to_string(), "unknown nucleotide \"X\"");
        assert!(err.is_query_error());
    }

    #[test]
    fn io_message_names_path() {
        let err = FastqError::io_err(io::Error::from(io::ErrorKind::NotFound), "missing.fastq");
        assert!(err.to_string().starts_with("can't read file \"missing.fastq\""));
        assert!(!err.is_query_error());
    }
}
