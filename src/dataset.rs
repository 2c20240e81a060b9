use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::error::{Error, Result};

/// Separates the word from its tag inside a token (`word_TAG`).
pub const DELIMITER: char = '_';

/// What the reader does with a token that is not `word_TAG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole read.
    #[default]
    Strict,
    /// Drop the token and log a warning.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new<W: Into<String>, T: Into<String>>(word: W, tag: T) -> Self {
        Self { word: word.into(), tag: tag.into() }
    }

    /// Splits at the last delimiter, so `New_York_NNP` is the word `New_York`.
    pub fn parse(token: &str) -> Option<Self> {
        let (word, tag) = token.rsplit_once(DELIMITER)?;
        if word.is_empty() || tag.is_empty() {
            return None;
        }
        Some(Self::new(word, tag))
    }
}

/// An ordered stream of tagged tokens.
///
/// The whole input is one sequence; line breaks carry no meaning other than
/// for error messages.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    tokens: Vec<TaggedToken>,
}

impl Corpus {
    pub fn read_file<P: AsRef<Path>>(path: P, policy: MalformedPolicy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = Self::read(BufReader::new(file), policy)?;
        log::info!("read {} tokens from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn read<R: BufRead>(reader: R, policy: MalformedPolicy) -> Result<Self> {
        let mut corpus = Corpus::default();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            for token in line.split_whitespace() {
                match TaggedToken::parse(token) {
                    Some(t) => corpus.tokens.push(t),
                    None if policy == MalformedPolicy::Lenient => {
                        log::warn!("skipping malformed token {token:?} at line {}", lineno + 1);
                    }
                    None => {
                        return Err(Error::MalformedToken { line: lineno + 1, token: token.to_string() });
                    }
                }
            }
        }
        Ok(corpus)
    }

    pub fn parse_str(text: &str, policy: MalformedPolicy) -> Result<Self> {
        Self::read(text.as_bytes(), policy)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedToken> {
        self.tokens.iter()
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.word.as_str()).collect()
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.tag.as_str()).collect()
    }
}

impl FromStr for Corpus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s, MalformedPolicy::Strict)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a TaggedToken;
    type IntoIter = std::slice::Iter<'a, TaggedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
