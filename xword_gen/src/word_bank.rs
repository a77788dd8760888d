use std::{collections::HashMap, fmt::Display};

use itertools::Itertools;

/// Dense index of a word within a `WordBank`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordId(u32);

impl Display for WordId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "w{}", self.0)
  }
}

/// The vocabulary, de-duplicated and sorted, with each word's letters
/// precomputed for constant time lookup.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
  words: Vec<String>,
  letters: Vec<Vec<char>>,
  ids: HashMap<String, WordId>,
}

impl WordBank {
  pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
    let words: Vec<_> = words.into_iter().sorted().dedup().collect();
    let letters = words.iter().map(|word| word.chars().collect()).collect();
    let ids = words
      .iter()
      .enumerate()
      .map(|(idx, word)| (word.clone(), WordId(idx as u32)))
      .collect();
    Self { words, letters, ids }
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn has(&self, word: &str) -> bool {
    self.ids.contains_key(word)
  }

  pub fn id(&self, word: &str) -> Option<WordId> {
    self.ids.get(word).cloned()
  }

  pub fn get(&self, id: WordId) -> Option<&str> {
    self.words.get(id.0 as usize).map(|word| word.as_str())
  }

  /// Length of the word in characters, 0 for unknown ids.
  pub fn word_len(&self, id: WordId) -> usize {
    self.letters.get(id.0 as usize).map_or(0, |letters| letters.len())
  }

  pub fn letter(&self, id: WordId, idx: u32) -> Option<char> {
    self
      .letters
      .get(id.0 as usize)
      .and_then(|letters| letters.get(idx as usize))
      .cloned()
  }

  pub fn all_ids(&self) -> impl Iterator<Item = WordId> {
    (0..self.words.len() as u32).map(WordId)
  }

  pub fn all_words_with_id(&self) -> impl Iterator<Item = (WordId, &str)> {
    self
      .words
      .iter()
      .enumerate()
      .map(|(idx, word)| (WordId(idx as u32), word.as_str()))
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::WordBank;

  fn bank() -> WordBank {
    WordBank::from_words(["TAB", "CAT", "DOG", "CAT", "ÉTÉ"].map(|word| word.to_owned()))
  }

  #[gtest]
  fn test_dedups_and_sorts() {
    let bank = bank();
    expect_that!(bank.len(), eq(4));
    expect_that!(
      bank.all_words_with_id().map(|(_, word)| word).collect::<Vec<_>>(),
      container_eq(["CAT", "DOG", "TAB", "ÉTÉ"])
    );
  }

  #[gtest]
  fn test_lookup() {
    let bank = bank();
    let dog = bank.id("DOG");
    expect_that!(dog, some(anything()));
    expect_that!(dog.and_then(|id| bank.get(id)), some(eq("DOG")));
    expect_that!(bank.id("COW"), none());
    expect_true!(bank.has("TAB"));
    expect_false!(bank.has("tab"));
  }

  #[gtest]
  fn test_letters_are_chars() {
    let bank = bank();
    let ete = bank.id("ÉTÉ").unwrap();
    expect_that!(bank.word_len(ete), eq(3));
    expect_that!(bank.letter(ete, 2), some(eq('É')));
    expect_that!(bank.letter(ete, 3), none());
  }
}
