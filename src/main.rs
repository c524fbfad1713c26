#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;

use std::{
  fs::{self, File},
  io::Write,
  path::Path,
  process::ExitCode,
  time::Duration,
};

use args::Args;
use clap::Parser;
use util::{
  bitcode,
  error::{XWordError, XWordResult},
  grid::Grid,
  log::init_logger,
  time::time_fn,
};
use xword_dict::Vocabulary;
use xword_gen::{
  puzzle::Puzzle,
  render::{load_font, render_image, render_text, save_png},
  search::{Outcome, SearchLimits, Solver},
};

fn read_puzzle(structure: &Path, vocabulary: Vocabulary) -> XWordResult<Puzzle> {
  let layout = fs::read_to_string(structure).map_err(|err| {
    XWordError::Parse(format!(
      "Failed to read structure {}: {err}",
      structure.display()
    ))
  })?;
  Puzzle::from_layout(&layout, vocabulary)
}

fn search_limits(args: &Args) -> XWordResult<SearchLimits> {
  let time_limit = args
    .time_limit
    .map(|seconds| {
      Duration::try_from_secs_f64(seconds)
        .map_err(|err| XWordError::Parse(format!("Invalid time limit {seconds}: {err}")))
    })
    .transpose()?;
  Ok(SearchLimits { node_limit: args.node_limit, time_limit })
}

fn save_grid(path: &Path, letters: &Grid<Option<char>>) -> XWordResult {
  let result = bitcode::encode(letters);
  let mut file = File::create(path)?;
  file.write_all(&result)?;
  Ok(())
}

/// Writes the solved grid to `path`: the raw letter grid when the extension is `bin`,
/// otherwise a PNG image.
fn save_solution(
  args: &Args,
  path: &Path,
  puzzle: &Puzzle,
  letters: &Grid<Option<char>>,
) -> XWordResult {
  if path.extension().is_some_and(|ext| ext == "bin") {
    save_grid(path, letters)?;
  } else {
    let font = args.font.as_deref().map(load_font).transpose()?;
    if font.is_none() {
      log::warn!("No --font given; the saved image will have no letters");
    }
    save_png(&render_image(puzzle, letters, font.as_ref()), path)?;
  }
  log::info!("Saved solution to {}", path.display());
  Ok(())
}

fn run(args: Args) -> XWordResult {
  let vocabulary = Vocabulary::from_file(&args.words)?;
  let puzzle = read_puzzle(&args.structure, vocabulary)?;
  let solver = Solver::with_limits(&puzzle, search_limits(&args)?);

  let (time, solution) = time_fn(|| solver.solve());
  let solution = solution?;
  log::info!("Took {}s", time.as_secs_f32());

  match &solution.outcome {
    Outcome::Solved(assignment) => {
      let letters = puzzle.letter_grid(assignment)?;
      print!("{}", render_text(&puzzle, &letters));
      if let Some(output) = &args.output {
        save_solution(&args, output, &puzzle, &letters)?;
      }
    }
    Outcome::Unsatisfiable => println!("No solution."),
    Outcome::LimitReached(reason) => println!("Search stopped: {reason}."),
  }

  if args.stats {
    println!("{}", solution.stats);
  }

  Ok(())
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_logger(args.debug);

  match run(args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("Error: {err}");
      ExitCode::FAILURE
    }
  }
}
