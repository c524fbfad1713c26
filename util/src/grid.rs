use bitcode::{Decode, Encode};

use crate::{
  error::{XWordError, XWordResult},
  pos::Pos,
};

/// Read access shared by [`Grid`] and its transposed view, so that code scanning rows
/// can scan columns by scanning the rows of the transpose.
pub trait Gridlike<T> {
  fn width(&self) -> u32;
  fn height(&self) -> u32;

  fn in_bounds(&self, pos: Pos) -> bool {
    pos.x >= 0 && pos.x < self.width() as i32 && pos.y >= 0 && pos.y < self.height() as i32
  }

  fn get(&self, pos: Pos) -> Option<&T>;

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;

  fn transpose(&self) -> impl Gridlike<T>;
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Grid<T> {
  grid: Vec<T>,
  width: u32,
  height: u32,
}

impl<T> Grid<T> {
  pub fn from_vec(grid: Vec<T>, width: u32, height: u32) -> XWordResult<Self> {
    let expected_size = width as usize * height as usize;
    if grid.len() != expected_size {
      return Err(
        XWordError::Internal(format!(
          "Expected grid.len() == expected_size, {} != {expected_size}",
          grid.len()
        ))
        .into(),
      );
    }

    Ok(Self { grid, width, height })
  }

  fn idx(&self, pos: Pos) -> usize {
    debug_assert!(self.in_bounds(pos));
    pos.x as usize + pos.y as usize * self.width as usize
  }

  /// All positions in row-major order.
  pub fn positions(&self) -> impl Iterator<Item = Pos> {
    let width = self.width;
    (0..self.height as i32).flat_map(move |y| (0..width as i32).map(move |x| Pos { x, y }))
  }

  pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
    if !self.in_bounds(pos) {
      return None;
    }
    let index = self.idx(pos);
    self.grid.get_mut(index)
  }
}

impl<T> Grid<T>
where
  T: Default,
{
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      grid: (0..width * height).map(|_| T::default()).collect(),
      width,
      height,
    }
  }
}

impl<T> Gridlike<T> for Grid<T> {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn get(&self, pos: Pos) -> Option<&T> {
    self
      .in_bounds(pos)
      .then(|| self.grid.get(self.idx(pos)))
      .flatten()
  }

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    let y = y as i32;
    (0..self.width()).flat_map(move |x| self.get(Pos { x: x as i32, y }))
  }

  fn transpose(&self) -> impl Gridlike<T> {
    TransposeGrid { grid: self }
  }
}

pub struct TransposeGrid<'a, T> {
  grid: &'a Grid<T>,
}

impl<T> Gridlike<T> for TransposeGrid<'_, T> {
  fn width(&self) -> u32 {
    self.grid.height()
  }

  fn height(&self) -> u32 {
    self.grid.width()
  }

  fn get(&self, pos: Pos) -> Option<&T> {
    self.grid.get(pos.transpose())
  }

  fn iter_row<'b, 'c>(&'b self, y: u32) -> impl Iterator<Item = &'c T>
  where
    'b: 'c,
    T: 'b,
  {
    let x = y as i32;
    (0..self.grid.height()).flat_map(move |y| self.grid.get(Pos { x, y: y as i32 }))
  }

  fn transpose(&self) -> impl Gridlike<T> {
    self.grid
  }
}

impl<G, T> Gridlike<T> for &G
where
  G: Gridlike<T>,
{
  fn width(&self) -> u32 {
    (**self).width()
  }

  fn height(&self) -> u32 {
    (**self).height()
  }

  fn get(&self, pos: Pos) -> Option<&T> {
    (**self).get(pos)
  }

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    (**self).iter_row(y)
  }

  fn transpose(&self) -> impl Gridlike<T> {
    (**self).transpose()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::{Grid, Gridlike};
  use crate::pos::Pos;

  fn sample() -> Grid<u32> {
    Grid::from_vec(vec![0, 1, 2, 3, 4, 5], 3, 2).unwrap()
  }

  #[gtest]
  fn test_from_vec_size_mismatch() {
    expect_that!(Grid::from_vec(vec![1, 2, 3], 2, 2), err(anything()));
  }

  #[gtest]
  fn test_get() {
    let grid = sample();
    expect_that!(grid.get(Pos { x: 2, y: 1 }), some(eq(&5)));
    expect_that!(grid.get(Pos { x: 3, y: 0 }), none());
    expect_that!(grid.get(Pos { x: 0, y: -1 }), none());
  }

  #[gtest]
  fn test_transposed_rows_are_columns() {
    let grid = sample();
    let transpose = grid.transpose();
    expect_that!(transpose.width(), eq(2));
    expect_that!(transpose.height(), eq(3));
    expect_that!(
      transpose.iter_row(1).cloned().collect::<Vec<_>>(),
      container_eq([1, 4])
    );
    expect_that!(transpose.get(Pos { x: 1, y: 2 }), some(eq(&5)));
  }

  #[gtest]
  fn test_get_mut_and_positions() {
    let mut grid = sample();
    *grid.get_mut(Pos { x: 0, y: 0 }).unwrap() = 10;
    expect_that!(grid.get_mut(Pos { x: 9, y: 9 }), none());
    expect_that!(
      grid.iter_row(0).cloned().collect::<Vec<_>>(),
      container_eq([10, 1, 2])
    );
    expect_that!(
      grid.positions().skip(2).take(2).collect::<Vec<_>>(),
      container_eq([Pos { x: 2, y: 0 }, Pos { x: 0, y: 1 }])
    );
  }

  #[gtest]
  fn test_saved_letter_grid_reads_back() {
    let mut letters: Grid<Option<char>> = Grid::new(2, 1);
    *letters.get_mut(Pos { x: 1, y: 0 }).unwrap() = Some('Q');
    let bytes = bitcode::encode(&letters);
    let decoded: Grid<Option<char>> = bitcode::decode(&bytes).unwrap();
    expect_true!(decoded == letters);
    expect_that!(decoded.get(Pos { x: 0, y: 0 }), some(eq(&None)));
  }
}
