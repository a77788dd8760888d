use std::collections::HashMap;

use util::{
  error::{XWordError, XWordResult},
  grid::{Grid, Gridlike},
  pos::Pos,
};

use crate::slot::{Direction, Slot, SlotId};

/// Runs shorter than this are not slots.
const MIN_SLOT_LENGTH: u32 = 2;

/// For two crossing slots, the index into each slot's word that lands on the
/// shared cell.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Overlap {
  pub first: u32,
  pub second: u32,
}

impl Overlap {
  pub const fn reversed(self) -> Self {
    Self { first: self.second, second: self.first }
  }
}

/// The static shape of a crossword: which cells are fillable, the slots they
/// form, and how those slots cross.
#[derive(Clone, Debug)]
pub struct XWordStructure {
  board: Grid<bool>,
  slots: Vec<Slot>,
  overlaps: HashMap<(SlotId, SlotId), Overlap>,
  neighbors: Vec<Vec<SlotId>>,
}

impl XWordStructure {
  /// Parses a layout with one row per line. `_` is fillable, `#`, `X` and `█`
  /// are blocked.
  pub fn from_layout(layout: &str) -> XWordResult<Self> {
    let (width, height, board) = layout
      .lines()
      .map(|line| line.trim())
      .filter(|line| !line.is_empty())
      .try_fold(
        (None, 0, vec![]),
        |(width, height, mut board), line| -> XWordResult<_> {
          let row = line
            .chars()
            .map(|c| match c {
              '_' => Ok(true),
              '#' | 'X' | '█' => Ok(false),
              _ => Err(XWordError::Parse(format!("Unrecognized board character '{c}'")).into()),
            })
            .collect::<XWordResult<Vec<_>>>()?;
          if let Some(width) = width {
            if row.len() != width {
              return Err(
                XWordError::Parse(format!(
                  "Board line lengths differ: {} vs {width}",
                  row.len()
                ))
                .into(),
              );
            }
          }

          let row_width = row.len();
          board.extend(row);
          Ok((Some(row_width), height + 1, board))
        },
      )?;

    let width = width.ok_or_else(|| XWordError::Parse("Empty board string".to_owned()))? as u32;
    Ok(Self::from_grid(Grid::from_vec(board, width, height)?))
  }

  pub fn from_grid(board: Grid<bool>) -> Self {
    let mut slots: Vec<_> = Self::iterate_row_slots(&board)
      .chain(Self::iterate_col_slots(&board))
      .collect();
    slots.sort();

    let overlaps = Self::build_overlaps(&slots);
    let mut neighbors = vec![Vec::new(); slots.len()];
    for &(a, b) in overlaps.keys() {
      neighbors[a.0].push(b);
    }
    neighbors.iter_mut().for_each(|slot_neighbors| slot_neighbors.sort());

    Self { board, slots, overlaps, neighbors }
  }

  fn iterate_board_runs<'a, G: Gridlike<bool> + 'a>(
    board: G,
  ) -> impl Iterator<Item = (Pos, u32)> + 'a {
    struct FillableRuns<I> {
      x: u32,
      iter: Option<I>,
    }

    impl<I> Iterator for FillableRuns<I>
    where
      I: Iterator<Item = bool>,
    {
      /// (start column, length)
      type Item = (u32, u32);

      fn next(&mut self) -> Option<(u32, u32)> {
        let iter = self.iter.as_mut()?;

        loop {
          match iter.next() {
            Some(true) => break,
            Some(false) => self.x += 1,
            None => {
              self.iter = None;
              return None;
            }
          }
        }
        let start = self.x;
        let mut length = 1;
        self.x += 1;

        loop {
          match iter.next() {
            Some(true) => {
              length += 1;
              self.x += 1;
            }
            Some(false) => {
              self.x += 1;
              break;
            }
            None => {
              self.iter = None;
              break;
            }
          }
        }

        Some((start, length))
      }
    }

    (0..board.height()).flat_map(move |y| {
      let runs: Vec<_> = FillableRuns { x: 0, iter: Some(board.iter_row(y).cloned()) }
        .map(|(x, length)| (Pos { x: x as i32, y: y as i32 }, length))
        .collect();
      runs.into_iter()
    })
  }

  fn iterate_row_slots(board: &Grid<bool>) -> impl Iterator<Item = Slot> + '_ {
    Self::iterate_board_runs(board)
      .filter(|&(_, length)| length >= MIN_SLOT_LENGTH)
      .map(|(pos, length)| Slot::new(pos, Direction::Across, length))
  }

  fn iterate_col_slots(board: &Grid<bool>) -> impl Iterator<Item = Slot> + '_ {
    Self::iterate_board_runs(board.transpose())
      .filter(|&(_, length)| length >= MIN_SLOT_LENGTH)
      .map(|(pos, length)| Slot::new(pos.transpose(), Direction::Down, length))
  }

  /// Records both directions of every crossing. Parallel slots never share a
  /// cell, so each cell holds at most one across and one down slot.
  fn build_overlaps(slots: &[Slot]) -> HashMap<(SlotId, SlotId), Overlap> {
    let across_cells: HashMap<Pos, (SlotId, u32)> = slots
      .iter()
      .enumerate()
      .filter(|(_, slot)| slot.direction() == Direction::Across)
      .flat_map(|(id, slot)| {
        slot
          .cells()
          .enumerate()
          .map(move |(offset, pos)| (pos, (SlotId(id), offset as u32)))
      })
      .collect();

    slots
      .iter()
      .enumerate()
      .filter(|(_, slot)| slot.direction() == Direction::Down)
      .flat_map(|(id, slot)| {
        let across_cells = &across_cells;
        slot.cells().enumerate().filter_map(move |(offset, pos)| {
          across_cells.get(&pos).map(|&(across, across_offset)| {
            let overlap = Overlap { first: offset as u32, second: across_offset };
            (SlotId(id), across, overlap)
          })
        })
      })
      .flat_map(|(down, across, overlap)| {
        [((down, across), overlap), ((across, down), overlap.reversed())]
      })
      .collect()
  }

  pub fn board(&self) -> &Grid<bool> {
    &self.board
  }

  pub fn width(&self) -> u32 {
    self.board.width()
  }

  pub fn height(&self) -> u32 {
    self.board.height()
  }

  pub fn available(&self, pos: Pos) -> bool {
    self.board.get(pos).is_some_and(|&available| available)
  }

  pub fn num_slots(&self) -> usize {
    self.slots.len()
  }

  pub fn slots(&self) -> &[Slot] {
    &self.slots
  }

  pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> {
    (0..self.slots.len()).map(SlotId)
  }

  pub fn slot(&self, id: SlotId) -> Option<&Slot> {
    self.slots.get(id.0)
  }

  pub fn slot_id(&self, slot: &Slot) -> Option<SlotId> {
    self.slots.binary_search(slot).ok().map(SlotId)
  }

  /// The overlap between `a` and `b`, indexed as (position in `a`, position in
  /// `b`), or `None` if they do not cross.
  pub fn overlap(&self, a: SlotId, b: SlotId) -> Option<Overlap> {
    self.overlaps.get(&(a, b)).cloned()
  }

  pub fn neighbors(&self, id: SlotId) -> &[SlotId] {
    self
      .neighbors
      .get(id.0)
      .map(|neighbors| neighbors.as_slice())
      .unwrap_or(&[])
  }

  pub fn degree(&self, id: SlotId) -> usize {
    self.neighbors(id).len()
  }

  /// Every directed arc (x, y) between crossing slots.
  pub fn arcs(&self) -> impl Iterator<Item = (SlotId, SlotId)> + '_ {
    self
      .slot_ids()
      .flat_map(move |x| self.neighbors(x).iter().map(move |&y| (x, y)))
  }

  /// The slots covering `pos`, with the offset of `pos` into each.
  pub fn slots_covering(&self, pos: Pos) -> impl Iterator<Item = (SlotId, u32)> + '_ {
    self
      .slots
      .iter()
      .enumerate()
      .filter_map(move |(id, slot)| slot.offset_of(pos).map(|offset| (SlotId(id), offset)))
  }
}
