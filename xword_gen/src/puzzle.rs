use std::{
  collections::{hash_map::Entry, HashMap},
  iter::once,
  ops::Range,
};

use itertools::Itertools;
use util::{
  error::{XWordError, XWordResult},
  grid::{Grid, Gridlike},
  pos::Pos,
};

use crate::{
  slot::{Direction, Slot, SlotId},
  word_bank::WordBank,
};

/// Where two slots cross: letter `first` of the first slot shares a cell with letter
/// `second` of the other.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Overlap {
  pub first: usize,
  pub second: usize,
}

impl Overlap {
  pub const fn reversed(self) -> Self {
    Self { first: self.second, second: self.first }
  }
}

/// The immutable description of a puzzle: geometry, slots, their pairwise overlaps,
/// and the candidate vocabulary.
#[derive(Clone, Debug)]
pub struct Puzzle {
  board: Grid<bool>,
  slots: Vec<Slot>,
  overlaps: HashMap<(SlotId, SlotId), Overlap>,
  neighbors: Vec<Vec<SlotId>>,
  bank: WordBank,
}

impl Puzzle {
  /// Parses a structure layout where `_` marks an open cell and any other character,
  /// whitespace included, a blocked one. Lines shorter than the widest are padded with
  /// blocked cells.
  ///
  /// Every maximal run of two or more open cells becomes a slot. Across slots are
  /// numbered first, in row-major order of their starting cell, followed by down slots
  /// in column-major order.
  pub fn from_layout(layout: &str, words: impl IntoIterator<Item = String>) -> XWordResult<Self> {
    let rows: Vec<Vec<bool>> = layout
      .lines()
      .map(|line| line.chars().map(|c| c == '_').collect())
      .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
      return Err(XWordError::Parse("Empty board string".to_owned()).into());
    }
    let height = rows.len();

    let board = rows
      .into_iter()
      .flat_map(|mut row| {
        row.resize(width, false);
        row
      })
      .collect();
    let board = Grid::from_vec(board, width as u32, height as u32)?;

    let across = Self::board_runs(&board)
      .into_iter()
      .map(|(pos, length)| Slot::new(pos, Direction::Across, length));
    let down = Self::board_runs(&board.transpose())
      .into_iter()
      .map(|(pos, length)| Slot::new(pos.transpose(), Direction::Down, length));
    let slots = across.chain(down).collect();

    Self::build(board, slots, words)
  }

  /// Builds a puzzle from an explicit list of slots. The board consists of exactly
  /// the cells the slots cover.
  pub fn from_slots(
    slots: impl IntoIterator<Item = Slot>,
    words: impl IntoIterator<Item = String>,
  ) -> XWordResult<Self> {
    let slots: Vec<_> = slots.into_iter().collect();
    if let Some(slot) = slots.iter().find(|slot| slot.length() == 0) {
      return Err(XWordError::InvalidPuzzle(format!("Slot {slot} has no cells")).into());
    }
    if let Some(slot) = slots.iter().duplicates().next() {
      return Err(XWordError::InvalidPuzzle(format!("Slot {slot} appears twice")).into());
    }
    let cells = slots.iter().flat_map(|slot| slot.cells()).collect_vec();
    if let Some(pos) = cells.iter().find(|pos| pos.x < 0 || pos.y < 0) {
      return Err(XWordError::InvalidPuzzle(format!("Cell {pos} is off the board")).into());
    }

    let width = cells.iter().map(|pos| pos.x + 1).max().unwrap_or(0) as u32;
    let height = cells.iter().map(|pos| pos.y + 1).max().unwrap_or(0) as u32;
    let mut board = Grid::new(width, height);
    for pos in cells {
      let cell = board.get_mut(pos).ok_or_else(|| {
        XWordError::Internal(format!("Position {pos} is out of bounds"))
      })?;
      *cell = true;
    }

    Self::build(board, slots, words)
  }

  /// Start and length of every run of two or more open cells, scanning rows.
  fn board_runs<G: Gridlike<bool>>(board: &G) -> Vec<(Pos, u32)> {
    let mut runs = vec![];
    for y in 0..board.height() {
      let mut start = None;
      for (x, &open) in board.iter_row(y).chain(once(&false)).enumerate() {
        match (open, start) {
          (true, None) => start = Some(x),
          (false, Some(begin)) => {
            if x - begin >= 2 {
              runs.push((Pos { x: begin as i32, y: y as i32 }, (x - begin) as u32));
            }
            start = None;
          }
          _ => {}
        }
      }
    }
    runs
  }

  fn build(
    board: Grid<bool>,
    slots: Vec<Slot>,
    words: impl IntoIterator<Item = String>,
  ) -> XWordResult<Self> {
    let mut cell_map: HashMap<Pos, Vec<(SlotId, usize)>> = HashMap::new();
    for (id, slot) in slots.iter().enumerate() {
      for (idx, pos) in slot.cells().enumerate() {
        cell_map.entry(pos).or_default().push((id, idx));
      }
    }

    let mut overlaps = HashMap::new();
    for (pos, occupants) in cell_map.iter().sorted_by_key(|(pos, _)| **pos) {
      for (&(a, a_idx), &(b, b_idx)) in occupants.iter().tuple_combinations() {
        let overlap = Overlap { first: a_idx, second: b_idx };
        match overlaps.entry((a, b)) {
          Entry::Occupied(_) => {
            return Err(
              XWordError::InvalidPuzzle(format!(
                "Slots {} and {} share more than one cell (again at {pos})",
                slots[a], slots[b]
              ))
              .into(),
            );
          }
          Entry::Vacant(entry) => {
            entry.insert(overlap);
          }
        }
        overlaps.insert((b, a), overlap.reversed());
      }
    }

    let mut neighbors = vec![Vec::new(); slots.len()];
    for &(a, b) in overlaps.keys() {
      neighbors[a].push(b);
    }
    neighbors.iter_mut().for_each(|list| list.sort_unstable());

    let bank = WordBank::from_words(words);
    log::debug!(
      "Puzzle has {} slots, {} overlaps and {} words",
      slots.len(),
      overlaps.len() / 2,
      bank.len()
    );

    Ok(Self { board, slots, overlaps, neighbors, bank })
  }

  pub fn board(&self) -> &Grid<bool> {
    &self.board
  }

  pub fn slots(&self) -> &[Slot] {
    &self.slots
  }

  pub fn slot(&self, id: SlotId) -> Option<&Slot> {
    self.slots.get(id)
  }

  pub fn slot_id(&self, slot: &Slot) -> Option<SlotId> {
    self.slots.iter().position(|other| other == slot)
  }

  pub fn slot_ids(&self) -> Range<SlotId> {
    0..self.slots.len()
  }

  pub fn num_slots(&self) -> usize {
    self.slots.len()
  }

  /// Length of slot `id` in letters. `id` must belong to this puzzle.
  pub fn slot_len(&self, id: SlotId) -> usize {
    self.slots[id].length() as usize
  }

  /// The overlap between `x` and `y`, oriented so that `first` indexes into `x`.
  pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
    self.overlaps.get(&(x, y)).copied()
  }

  pub fn neighbors(&self, id: SlotId) -> &[SlotId] {
    self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn degree(&self, id: SlotId) -> usize {
    self.neighbors(id).len()
  }

  /// Every directed arc `(x, y)` between overlapping slots, in slot order.
  pub fn arcs(&self) -> impl Iterator<Item = (SlotId, SlotId)> + '_ {
    self
      .slot_ids()
      .flat_map(move |x| self.neighbors(x).iter().map(move |&y| (x, y)))
  }

  pub fn bank(&self) -> &WordBank {
    &self.bank
  }

  pub fn width(&self) -> u32 {
    self.board.width()
  }

  pub fn height(&self) -> u32 {
    self.board.height()
  }
}
