use std::collections::BTreeMap;

use itertools::Itertools;
use util::{
  error::{XWordError, XWordResult},
  pos::Pos,
};

use crate::{domain::Domains, slot::SlotId, word_bank::WordId, xword::XWord};

/// A partial mapping from slots to words. Only the crate's search pushes words
/// unchecked; everything else goes through `XWord::assign`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
  words: BTreeMap<SlotId, WordId>,
}

impl Assignment {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn get(&self, slot: SlotId) -> Option<WordId> {
    self.words.get(&slot).cloned()
  }

  pub fn is_assigned(&self, slot: SlotId) -> bool {
    self.words.contains_key(&slot)
  }

  pub fn uses_word(&self, word: WordId) -> bool {
    self.words.values().any(|&assigned| assigned == word)
  }

  pub fn iter(&self) -> impl Iterator<Item = (SlotId, WordId)> + '_ {
    self.words.iter().map(|(&slot, &word)| (slot, word))
  }

  /// Removes the word assigned to `slot`, returning it.
  pub fn unassign(&mut self, slot: SlotId) -> Option<WordId> {
    self.words.remove(&slot)
  }

  pub(crate) fn push(&mut self, slot: SlotId, word: WordId) {
    debug_assert!(!self.words.contains_key(&slot));
    self.words.insert(slot, word);
  }
}

impl XWord {
  pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
    assignment.len() == self.structure().num_slots()
  }

  /// Whether every assigned word is distinct, fits its slot's length, and
  /// agrees with every assigned crossing slot.
  pub fn consistent(&self, assignment: &Assignment) -> bool {
    if !assignment.words.values().all_unique() {
      return false;
    }

    assignment.iter().all(|(slot, word)| {
      self
        .structure()
        .slot(slot)
        .is_some_and(|s| self.bank().word_len(word) == s.length() as usize)
        && self.agrees_with_neighbors(assignment, slot, word)
    })
  }

  /// Whether adding (slot, word) to an already consistent assignment keeps it
  /// consistent.
  pub(crate) fn consistent_with(&self, assignment: &Assignment, slot: SlotId, word: WordId) -> bool {
    !assignment.is_assigned(slot)
      && !assignment.uses_word(word)
      && self
        .structure()
        .slot(slot)
        .is_some_and(|s| self.bank().word_len(word) == s.length() as usize)
      && self.agrees_with_neighbors(assignment, slot, word)
  }

  fn agrees_with_neighbors(&self, assignment: &Assignment, slot: SlotId, word: WordId) -> bool {
    self.structure().neighbors(slot).iter().all(|&neighbor| {
      match (assignment.get(neighbor), self.structure().overlap(slot, neighbor)) {
        (Some(neighbor_word), Some(overlap)) => {
          let letter = self.bank().letter(word, overlap.first);
          letter.is_some() && letter == self.bank().letter(neighbor_word, overlap.second)
        }
        _ => true,
      }
    })
  }

  /// Assigns `word` to `slot` if the result stays consistent and the word is
  /// still in the slot's domain. The assignment is untouched on error.
  pub fn assign(
    &self,
    assignment: &mut Assignment,
    domains: &Domains,
    slot: SlotId,
    word: &str,
  ) -> XWordResult {
    let s = self
      .structure()
      .slot(slot)
      .ok_or_else(|| XWordError::Assignment(format!("Unknown slot {slot}")))?;
    let id = self
      .bank()
      .id(word)
      .ok_or_else(|| XWordError::Assignment(format!("\"{word}\" is not in the vocabulary")))?;

    if self.bank().word_len(id) != s.length() as usize {
      return Err(
        XWordError::Assignment(format!(
          "\"{word}\" has length {} but slot {s} has length {}",
          self.bank().word_len(id),
          s.length()
        ))
        .into(),
      );
    }
    if !domains.contains(slot, id) {
      return Err(XWordError::Assignment(format!("\"{word}\" is not in the domain of {s}")).into());
    }
    if assignment.is_assigned(slot) {
      return Err(XWordError::Assignment(format!("Slot {s} is already assigned")).into());
    }
    if assignment.uses_word(id) {
      return Err(XWordError::Assignment(format!("\"{word}\" is already assigned")).into());
    }
    if !self.agrees_with_neighbors(assignment, slot, id) {
      return Err(
        XWordError::Assignment(format!("\"{word}\" conflicts with a crossing word of {s}")).into(),
      );
    }

    assignment.push(slot, id);
    Ok(())
  }

  pub fn word<'a>(&'a self, assignment: &Assignment, slot: SlotId) -> Option<&'a str> {
    assignment.get(slot).and_then(|word| self.bank().get(word))
  }

  /// The letter an assignment places at `pos`, if any assigned slot covers it.
  pub fn letter_at(&self, assignment: &Assignment, pos: Pos) -> Option<char> {
    self
      .structure()
      .slots_covering(pos)
      .filter_map(|(slot, offset)| {
        assignment
          .get(slot)
          .and_then(|word| self.bank().letter(word, offset))
      })
      .next()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use util::pos::Pos;

  use crate::{
    slot::{Direction, Slot, SlotId},
    xword::XWord,
  };

  use super::Assignment;

  fn words(words: &[&str]) -> Vec<String> {
    words.iter().map(|&word| word.to_owned()).collect()
  }

  fn plus(vocabulary: &[&str]) -> (XWord, SlotId, SlotId) {
    let xword = XWord::from_layout(
      "#_#
       ___
       #_#",
      words(vocabulary),
    )
    .unwrap();
    let across = xword
      .structure()
      .slot_id(&Slot::new(Pos { x: 0, y: 1 }, Direction::Across, 3))
      .unwrap();
    let down = xword
      .structure()
      .slot_id(&Slot::new(Pos { x: 1, y: 0 }, Direction::Down, 3))
      .unwrap();
    (xword, across, down)
  }

  #[gtest]
  fn test_assign_valid() {
    let (xword, across, down) = plus(&["CAT", "TAB", "DOG"]);
    let domains = xword.initial_domains();
    let mut assignment = Assignment::new();

    assert_that!(xword.assign(&mut assignment, &domains, across, "CAT"), ok(anything()));
    assert_that!(xword.assign(&mut assignment, &domains, down, "TAB"), ok(anything()));
    expect_true!(xword.consistent(&assignment));
    expect_true!(xword.assignment_complete(&assignment));
    expect_that!(xword.word(&assignment, across), some(eq("CAT")));
    expect_that!(xword.word(&assignment, down), some(eq("TAB")));
  }

  #[gtest]
  fn test_assign_rejects_without_mutating() {
    let (xword, across, down) = plus(&["CAT", "TAB", "DOG", "AT"]);
    let domains = xword.initial_domains();
    let mut assignment = Assignment::new();
    assert_that!(xword.assign(&mut assignment, &domains, across, "CAT"), ok(anything()));
    let before = assignment.clone();

    // Wrong length.
    expect_that!(
      xword.assign(&mut assignment, &domains, down, "AT"),
      err(displays_as(contains_substring("length")))
    );
    // Not in the vocabulary.
    expect_that!(xword.assign(&mut assignment, &domains, down, "COW"), err(anything()));
    // Duplicate word.
    expect_that!(
      xword.assign(&mut assignment, &domains, down, "CAT"),
      err(displays_as(contains_substring("already assigned")))
    );
    // Crossing letters disagree: CAT has A in the middle, DOG has O.
    expect_that!(
      xword.assign(&mut assignment, &domains, down, "DOG"),
      err(displays_as(contains_substring("conflicts")))
    );
    // Slot already holds a word.
    expect_that!(xword.assign(&mut assignment, &domains, across, "TAB"), err(anything()));
    // Unknown slot.
    expect_that!(
      xword.assign(&mut assignment, &domains, SlotId(7), "TAB"),
      err(anything())
    );

    expect_that!(assignment, eq(&before));
  }

  #[gtest]
  fn test_assign_rejects_words_outside_domain() {
    let (xword, across, down) = plus(&["CAT", "TAB", "DOG"]);
    let domains = xword
      .domains_from_candidates([(across, vec!["CAT"]), (down, vec!["TAB"])])
      .unwrap();
    let mut assignment = Assignment::new();
    expect_that!(
      xword.assign(&mut assignment, &domains, across, "DOG"),
      err(displays_as(contains_substring("domain")))
    );
    expect_true!(assignment.is_empty());
  }

  #[gtest]
  fn test_consistent_detects_conflicts() {
    let (xword, across, down) = plus(&["CAT", "DOG", "TAB"]);
    let cat = xword.bank().id("CAT").unwrap();
    let dog = xword.bank().id("DOG").unwrap();

    let mut assignment = Assignment::new();
    assignment.push(across, cat);
    expect_true!(xword.consistent(&assignment));
    expect_false!(xword.consistent_with(&assignment, down, dog));
    expect_false!(xword.consistent_with(&assignment, down, cat));

    assignment.push(down, dog);
    expect_false!(xword.consistent(&assignment));

    assignment.unassign(down);
    assignment.push(down, cat);
    expect_false!(xword.consistent(&assignment));
  }

  #[gtest]
  fn test_letter_at_partial_assignment() {
    let (xword, across, down) = plus(&["CAT", "TAB"]);
    let domains = xword.initial_domains();
    let mut assignment = Assignment::new();
    xword.assign(&mut assignment, &domains, down, "TAB").unwrap();

    expect_that!(xword.letter_at(&assignment, Pos { x: 1, y: 0 }), some(eq('T')));
    expect_that!(xword.letter_at(&assignment, Pos { x: 1, y: 1 }), some(eq('A')));
    expect_that!(xword.letter_at(&assignment, Pos { x: 0, y: 1 }), none());
    expect_that!(xword.letter_at(&assignment, Pos::zero()), none());

    xword.assign(&mut assignment, &domains, across, "CAT").unwrap();
    expect_that!(xword.letter_at(&assignment, Pos { x: 0, y: 1 }), some(eq('C')));
    expect_that!(xword.letter_at(&assignment, Pos { x: 1, y: 1 }), some(eq('A')));
    expect_that!(xword.letter_at(&assignment, Pos { x: 2, y: 1 }), some(eq('T')));
  }
}
