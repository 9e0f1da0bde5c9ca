use crate::{AlignError, Result};
use std::{fmt, str::FromStr};

/// The accepted symbols, in rank order.
pub const ALPHABET: [u8; 4] = *b"ACGT";

/// Rank of a nucleotide in `ACGT`, ignoring case.
#[inline]
pub fn rank(symbol: u8) -> Option<u8> {
    match symbol.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// A validated nucleotide sequence.
///
/// The input bytes are kept as given so alignments spell the input back,
/// while scoring goes through the case-normalised ranks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    text: Vec<u8>,
    ranks: Vec<u8>,
}

impl Sequence {
    pub fn new(text: impl Into<Vec<u8>>) -> Result<Self> {
        let text = text.into();
        let ranks = text
            .iter()
            .enumerate()
            .map(|(position, &symbol)| {
                rank(symbol).ok_or(AlignError::UnknownSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { text, ranks })
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The symbols as they were given.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Ranks in `0..4`, one per symbol.
    pub fn ranks(&self) -> &[u8] {
        &self.ranks
    }
}

impl FromStr for Sequence {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for Sequence {
    type Error = AlignError;

    fn try_from(text: &[u8]) -> Result<Self> {
        Self::new(text)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.text))
    }
}
