#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{
  borrow::Borrow,
  collections::HashMap,
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use itertools::Itertools;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use util::error::{XWordError, XWordResult};

#[allow(clippy::expect_used)]
static WORD_PATTERN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\p{Alphabetic}+$").expect("word pattern is a valid regex"));

/// The vocabulary a crossword is filled from: canonical (uppercase), unique, sorted words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XWordDict {
  words: Vec<String>,
}

impl XWordDict {
  fn canonicalize_word(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
      return None;
    }
    if !WORD_PATTERN.is_match(word) {
      debug!("Skipping non-alphabetic word list entry \"{word}\"");
      return None;
    }
    Some(word.to_uppercase())
  }

  pub fn parse_word_list<S>(lines: impl IntoIterator<Item = S>) -> Self
  where
    S: Borrow<str>,
  {
    Self {
      words: lines
        .into_iter()
        .filter_map(|line| Self::canonicalize_word(line.borrow()))
        .sorted()
        .dedup()
        .collect(),
    }
  }

  pub fn from_reader(reader: impl BufRead) -> XWordResult<Self> {
    Ok(Self::parse_word_list(
      reader.lines().collect::<Result<Vec<_>, _>>()?,
    ))
  }

  pub fn from_file(path: impl AsRef<Path>) -> XWordResult<Self> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
      XWordError::Parse(format!("Failed to open word list {}: {err}", path.display()))
    })?;
    Self::from_reader(BufReader::new(file))
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn words(&self) -> impl Iterator<Item = &str> {
    self.words.iter().map(|word| word.as_str())
  }

  /// Number of words of each length.
  pub fn length_histogram(&self) -> HashMap<usize, usize> {
    self.words.iter().map(|word| word.chars().count()).counts()
  }

  pub fn into_words(self) -> Vec<String> {
    self.words
  }
}
