use std::error::Error;

#[derive(Debug, thiserror::Error)]
pub enum XWordError {
  /// A broken invariant inside the solver. Never expected on valid input.
  #[error("Internal error: {0}")]
  Internal(String),
  #[error("Parse error: {0}")]
  Parse(String),
  /// The puzzle definition cannot be expressed with binary overlap constraints.
  #[error("Invalid puzzle: {0}")]
  InvalidPuzzle(String),
}

pub type XWordResult<T = ()> = Result<T, Box<dyn Error>>;
