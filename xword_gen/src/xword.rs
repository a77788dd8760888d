use util::error::XWordResult;
use xword_dict::XWordDict;

use crate::{structure::XWordStructure, word_bank::WordBank};

/// A crossword structure paired with the vocabulary it is filled from.
#[derive(Clone, Debug)]
pub struct XWord {
  structure: XWordStructure,
  bank: WordBank,
}

impl XWord {
  pub fn new(structure: XWordStructure, words: impl IntoIterator<Item = String>) -> Self {
    Self { structure, bank: WordBank::from_words(words) }
  }

  pub fn from_layout(layout: &str, words: impl IntoIterator<Item = String>) -> XWordResult<Self> {
    Ok(Self::new(XWordStructure::from_layout(layout)?, words))
  }

  pub fn from_dict(structure: XWordStructure, dict: XWordDict) -> Self {
    Self::new(structure, dict.into_words())
  }

  pub fn structure(&self) -> &XWordStructure {
    &self.structure
  }

  pub fn bank(&self) -> &WordBank {
    &self.bank
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use xword_dict::XWordDict;

  use crate::structure::XWordStructure;

  use super::XWord;

  #[gtest]
  fn test_from_layout_propagates_parse_errors() {
    expect_that!(XWord::from_layout("_\n__", Vec::<String>::new()), err(anything()));
  }

  #[gtest]
  fn test_from_dict() {
    let structure = XWordStructure::from_layout("___").unwrap();
    let xword = XWord::from_dict(structure, XWordDict::parse_word_list(["cat", "Cat", "dog"]));
    expect_that!(xword.bank().len(), eq(2));
    expect_that!(xword.structure().num_slots(), eq(1));
  }
}
