use std::fmt::Display;

use util::grid::{Grid, Gridlike, MutGridlike};

use crate::{assignment::Assignment, xword::XWord};

const WALL: char = '█';

impl XWord {
  /// The letters an assignment places on the board. Cells not covered by an
  /// assigned slot are `None`.
  pub fn letter_grid(&self, assignment: &Assignment) -> Grid<Option<char>> {
    let mut grid: Grid<Option<char>> =
      Grid::new(self.structure().width(), self.structure().height());
    for (slot, word) in assignment.iter() {
      let Some(slot) = self.structure().slot(slot) else {
        continue;
      };
      for (idx, pos) in slot.cells().enumerate() {
        if let (Some(tile), Some(letter)) = (grid.get_mut(pos), self.bank().letter(word, idx as u32))
        {
          *tile = Some(letter);
        }
      }
    }
    grid
  }

  pub fn display<'a>(&'a self, assignment: &Assignment) -> FilledXWord<'a> {
    FilledXWord { xword: self, letters: self.letter_grid(assignment) }
  }
}

/// Renders an assignment one row per line: walls as `█`, unfilled cells as a
/// space.
pub struct FilledXWord<'a> {
  xword: &'a XWord,
  letters: Grid<Option<char>>,
}

impl FilledXWord<'_> {
  /// The letter grid being rendered, as saved by the command-line tool.
  pub fn letters(&self) -> &Grid<Option<char>> {
    &self.letters
  }
}

impl Display for FilledXWord<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let board = self.xword.structure().board();
    (0..board.height()).try_fold((), |_, y| {
      board
        .iter_row(y)
        .zip(self.letters.iter_row(y))
        .try_fold((), |_, (&available, letter)| {
          let c = match (available, letter) {
            (false, _) => WALL,
            (true, Some(letter)) => *letter,
            (true, None) => ' ',
          };
          write!(f, "{c}")
        })?;
      writeln!(f)
    })
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use util::{grid::Gridlike, pos::Pos};

  use crate::{
    assignment::Assignment,
    slot::{Direction, Slot},
    xword::XWord,
  };

  fn plus() -> XWord {
    XWord::from_layout(
      "#_#
       ___
       #_#",
      ["CAT", "TAB"].map(|word| word.to_owned()),
    )
    .unwrap()
  }

  #[gtest]
  fn test_letter_grid_matches_letter_at() {
    let xword = plus();
    let assignment = xword.solve().unwrap();
    let grid = xword.letter_grid(&assignment);
    for pos in grid.positions() {
      expect_that!(
        grid.get(pos).cloned().flatten(),
        eq(xword.letter_at(&assignment, pos))
      );
    }
    expect_that!(grid.get(Pos::zero()).cloned().flatten(), none());
    expect_that!(grid.get(Pos { x: 1, y: 1 }).cloned().flatten(), some(eq('A')));
  }

  #[gtest]
  fn test_display_full() {
    let xword = plus();
    let domains = xword.initial_domains();
    let structure = xword.structure();
    let across = structure
      .slot_id(&Slot::new(Pos { x: 0, y: 1 }, Direction::Across, 3))
      .unwrap();
    let down = structure
      .slot_id(&Slot::new(Pos { x: 1, y: 0 }, Direction::Down, 3))
      .unwrap();

    let mut assignment = Assignment::new();
    xword.assign(&mut assignment, &domains, across, "CAT").unwrap();
    xword.assign(&mut assignment, &domains, down, "TAB").unwrap();
    expect_that!(
      xword.display(&assignment).to_string(),
      eq("█T█\nCAT\n█B█\n")
    );
  }

  #[gtest]
  fn test_display_partial() {
    let xword = plus();
    let domains = xword.initial_domains();
    let across = xword
      .structure()
      .slot_id(&Slot::new(Pos { x: 0, y: 1 }, Direction::Across, 3))
      .unwrap();

    let mut assignment = Assignment::new();
    xword.assign(&mut assignment, &domains, across, "TAB").unwrap();
    expect_that!(
      xword.display(&assignment).to_string(),
      eq("█ █\nTAB\n█ █\n")
    );
  }

  #[gtest]
  fn test_display_letters_match_letter_grid() {
    let xword = plus();
    let assignment = xword.solve().unwrap();
    let filled = xword.display(&assignment);
    let letters = filled.letters();
    let expected = xword.letter_grid(&assignment);
    expect_that!(letters.width(), eq(3));
    expect_that!(letters.height(), eq(3));
    for pos in letters.positions() {
      expect_that!(letters.get(pos), eq(expected.get(pos)));
    }
  }
}
