use std::fmt;

/// Strand-sense marker from the third line of a FASTQ record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    /// Parse a whole marker line; only `+` and `-` are accepted.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One validated FASTQ record.
///
/// `seq` keeps its original casing; `avg_quality` is fixed at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Read {
    pub id: String,
    pub seq: String,
    pub strand: Strand,
    pub qual: String,
    pub(crate) avg_quality: f64,
}

impl Read {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Mean quality code of this read, rounded to two decimals.
    #[inline]
    pub fn avg_quality(&self) -> f64 {
        self.avg_quality
    }

    /// Characters needed to write this record back out, line breaks included.
    pub fn serialized_len(&self) -> usize {
        self.id.len() + self.seq.len() + 1 + self.qual.len() + 4
    }
}

impl fmt::Display for Read {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{}", self.seq)?;
        writeln!(f, "{}", self.strand)?;
        write!(f, "{}", self.qual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(seq: &str, qual: &str) -> Read {
        Read {
            id: "@r1".into(),
            seq: seq.into(),
            strand: Strand::Minus,
            qual: qual.into(),
            avg_quality: 0.0,
        }
    }

    #[test]
    fn strand_markers() {
        assert_eq!(Strand::from_marker("+"), Some(Strand::Plus));
        assert_eq!(Strand::from_marker("-"), Some(Strand::Minus));
        assert_eq!(Strand::from_marker("+r1"), None);
        assert_eq!(Strand::from_marker(""), None);
        assert_eq!(Strand::Minus.to_string(), "-");
    }

    #[test]
    fn display_is_four_file_lines() {
        let r = read("acgT", "!!II");
        assert_eq!(r.to_string(), "@r1\nacgT\n-\n!!II");
        assert_eq!(r.serialized_len(), 3 + 4 + 1 + 4 + 4);
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
    }
}
