use std::fmt::Display;

use util::pos::{Diff, Pos};

/// Index of a slot in its puzzle.
pub type SlotId = usize;

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

/// A run of cells to be filled by a single word. Two slots are equal only when
/// start, direction and length all match.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slot {
  pos: Pos,
  direction: Direction,
  length: u32,
}

impl Slot {
  pub const fn new(pos: Pos, direction: Direction, length: u32) -> Self {
    Self { pos, direction, length }
  }

  pub const fn across(row: i32, col: i32, length: u32) -> Self {
    Self::new(Pos { x: col, y: row }, Direction::Across, length)
  }

  pub const fn down(row: i32, col: i32, length: u32) -> Self {
    Self::new(Pos { x: col, y: row }, Direction::Down, length)
  }

  pub const fn length(&self) -> u32 {
    self.length
  }

  pub fn cell(&self, idx: u32) -> Pos {
    self.pos + idx as i32 * self.direction.step()
  }

  pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
    (0..self.length).map(move |idx| self.cell(idx))
  }
}

impl Display for Slot {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let direction = match self.direction {
      Direction::Across => "across",
      Direction::Down => "down",
    };
    write!(f, "{}x{direction}@{}", self.length, self.pos)
  }
}
