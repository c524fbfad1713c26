use std::{fs, path::Path};

use ab_glyph::{FontVec, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::{
  drawing::{draw_filled_rect_mut, draw_text_mut, text_size},
  rect::Rect,
};
use util::{
  error::{XWordError, XWordResult},
  grid::{Grid, Gridlike},
  pos::Pos,
};

use crate::{assignment::Assignment, puzzle::Puzzle};

const WALL: char = '█';
const UNFILLED: char = ' ';

/// Side of one cell in a rendered image, in pixels.
pub const CELL_SIZE: u32 = 100;
const CELL_BORDER: u32 = 2;
const LETTER_SCALE: f32 = 80.0;
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

impl Puzzle {
  /// Writes the letters of every assigned word onto a grid the size of the board.
  /// Cells no assigned slot covers stay `None`.
  pub fn letter_grid(&self, assignment: &Assignment) -> XWordResult<Grid<Option<char>>> {
    let mut letters = Grid::new(self.width(), self.height());

    for (slot_id, word_id) in assignment.iter() {
      let slot = self
        .slot(slot_id)
        .ok_or_else(|| XWordError::Internal(format!("Unknown slot id {slot_id}")))?;
      let word = self
        .bank()
        .get(word_id)
        .ok_or_else(|| XWordError::Internal(format!("Unknown word id {word_id}")))?;

      for (&c, pos) in word.letters().iter().zip(slot.cells()) {
        let tile = letters.get_mut(pos).ok_or_else(|| {
          XWordError::Internal(format!("Position {pos} is out of bounds"))
        })?;
        match tile {
          Some(existing_c) => {
            if c != *existing_c {
              return Err(
                XWordError::Internal(format!(
                  "Conflicting letter assignment at position {pos}: {c} vs {existing_c}"
                ))
                .into(),
              );
            }
          }
          None => *tile = Some(c),
        }
      }
    }

    Ok(letters)
  }
}

/// Draws the board one row per line: walls as `█`, open cells as their letter, or a
/// space while unfilled.
pub fn render_text(puzzle: &Puzzle, letters: &Grid<Option<char>>) -> String {
  let board = puzzle.board();
  let mut out = String::new();
  for y in 0..board.height() as i32 {
    for x in 0..board.width() as i32 {
      let pos = Pos { x, y };
      let c = match board.get(pos) {
        Some(true) => letters.get(pos).copied().flatten().unwrap_or(UNFILLED),
        _ => WALL,
      };
      out.push(c);
    }
    out.push('\n');
  }
  out
}

/// Draws the board as an image of `CELL_SIZE` pixel cells: black walls, white open
/// cells separated by a thin black border, and each filled letter centered in its
/// cell. Without a font the letters are left out.
pub fn render_image(
  puzzle: &Puzzle,
  letters: &Grid<Option<char>>,
  font: Option<&FontVec>,
) -> RgbImage {
  let board = puzzle.board();
  let interior = CELL_SIZE - 2 * CELL_BORDER;
  let scale = PxScale::from(LETTER_SCALE);
  let mut image = RgbImage::from_pixel(
    board.width() * CELL_SIZE,
    board.height() * CELL_SIZE,
    BLACK,
  );

  for pos in board.positions().filter(|&pos| board.get(pos) == Some(&true)) {
    let left = pos.x * CELL_SIZE as i32 + CELL_BORDER as i32;
    let top = pos.y * CELL_SIZE as i32 + CELL_BORDER as i32;
    draw_filled_rect_mut(
      &mut image,
      Rect::at(left, top).of_size(interior, interior),
      WHITE,
    );

    let (Some(font), Some(&Some(c))) = (font, letters.get(pos)) else {
      continue;
    };
    let text = c.to_string();
    let (width, height) = text_size(scale, font, &text);
    draw_text_mut(
      &mut image,
      BLACK,
      left + (interior.saturating_sub(width) / 2) as i32,
      top + (interior.saturating_sub(height) / 2) as i32,
      scale,
      font,
      &text,
    );
  }

  image
}

pub fn load_font(path: &Path) -> XWordResult<FontVec> {
  let bytes = fs::read(path).map_err(|err| {
    XWordError::Parse(format!("Failed to read font {}: {err}", path.display()))
  })?;
  FontVec::try_from_vec(bytes).map_err(|err| {
    XWordError::Parse(format!("Invalid font {}: {err}", path.display())).into()
  })
}

pub fn save_png(image: &RgbImage, path: &Path) -> XWordResult {
  image.save_with_format(path, ImageFormat::Png)?;
  Ok(())
}
