use std::{cmp::Ordering, fmt::Display};

use util::pos::{Diff, Pos};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
  Across,
  Down,
}

impl Direction {
  pub const fn step(self) -> Diff {
    match self {
      Direction::Across => Diff::DX,
      Direction::Down => Diff::DY,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Direction::Across => write!(f, "across"),
      Direction::Down => write!(f, "down"),
    }
  }
}

/// Dense index of a slot within the structure it was derived from.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
  pub fn index(self) -> usize {
    self.0
  }
}

impl Display for SlotId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// A maximal run of fillable cells in one direction, holding exactly one word.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Slot {
  pos: Pos,
  direction: Direction,
  length: u32,
}

impl Slot {
  pub const fn new(pos: Pos, direction: Direction, length: u32) -> Self {
    Self { pos, direction, length }
  }

  pub const fn pos(&self) -> Pos {
    self.pos
  }

  pub const fn row(&self) -> u32 {
    self.pos.y as u32
  }

  pub const fn col(&self) -> u32 {
    self.pos.x as u32
  }

  pub const fn direction(&self) -> Direction {
    self.direction
  }

  pub const fn length(&self) -> u32 {
    self.length
  }

  /// The cells covered by this slot, in word order.
  pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
    let step = self.direction.step();
    (0..self.length as i32).map(move |idx| self.pos + idx * step)
  }

  /// The index into this slot's word that lands on `pos`, if the slot covers it.
  pub fn offset_of(&self, pos: Pos) -> Option<u32> {
    let diff = pos - self.pos;
    let (along, across) = match self.direction {
      Direction::Across => (diff.x, diff.y),
      Direction::Down => (diff.y, diff.x),
    };
    (across == 0 && along >= 0 && (along as u32) < self.length).then_some(along as u32)
  }
}

impl PartialOrd for Slot {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Slot {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.row(), self.col(), self.direction, self.length).cmp(&(
      other.row(),
      other.col(),
      other.direction,
      other.length,
    ))
  }
}

impl Display for Slot {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {} (length {})", self.pos, self.direction, self.length)
  }
}

#[cfg(test)]
mod tests {
  use googletest::prelude::*;
  use util::pos::Pos;

  use super::{Direction, Slot};

  #[gtest]
  fn test_cells() {
    let slot = Slot::new(Pos { x: 1, y: 2 }, Direction::Down, 3);
    expect_that!(
      slot.cells().collect::<Vec<_>>(),
      container_eq([Pos { x: 1, y: 2 }, Pos { x: 1, y: 3 }, Pos { x: 1, y: 4 }])
    );
  }

  #[gtest]
  fn test_offset_of() {
    let slot = Slot::new(Pos { x: 1, y: 2 }, Direction::Across, 4);
    expect_that!(slot.offset_of(Pos { x: 1, y: 2 }), some(eq(0)));
    expect_that!(slot.offset_of(Pos { x: 4, y: 2 }), some(eq(3)));
    expect_that!(slot.offset_of(Pos { x: 5, y: 2 }), none());
    expect_that!(slot.offset_of(Pos { x: 0, y: 2 }), none());
    expect_that!(slot.offset_of(Pos { x: 2, y: 3 }), none());
  }

  #[gtest]
  fn test_equality_uses_every_attribute() {
    let slot = Slot::new(Pos::zero(), Direction::Across, 3);
    expect_that!(slot, eq(Slot::new(Pos::zero(), Direction::Across, 3)));
    expect_that!(slot, not(eq(Slot::new(Pos::zero(), Direction::Down, 3))));
    expect_that!(slot, not(eq(Slot::new(Pos::zero(), Direction::Across, 4))));
  }

  #[gtest]
  fn test_ordering() {
    let mut slots = vec![
      Slot::new(Pos { x: 0, y: 1 }, Direction::Across, 2),
      Slot::new(Pos { x: 1, y: 0 }, Direction::Down, 3),
      Slot::new(Pos { x: 1, y: 0 }, Direction::Across, 2),
      Slot::new(Pos { x: 0, y: 0 }, Direction::Down, 2),
    ];
    slots.sort();
    expect_that!(
      slots,
      container_eq([
        Slot::new(Pos { x: 0, y: 0 }, Direction::Down, 2),
        Slot::new(Pos { x: 1, y: 0 }, Direction::Across, 2),
        Slot::new(Pos { x: 1, y: 0 }, Direction::Down, 3),
        Slot::new(Pos { x: 0, y: 1 }, Direction::Across, 2),
      ])
    );
  }
}
