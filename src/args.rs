use std::path::PathBuf;

use clap::Parser;

/// Fills a crossword structure with words from a word list.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
  /// Structure file: `_` marks an open cell, anything else a blocked one.
  pub structure: PathBuf,

  /// Word list with one word per line.
  pub words: PathBuf,

  /// Where to save the solved crossword: a PNG image, or the bitcode-encoded letter
  /// grid when the path ends in `.bin`.
  pub output: Option<PathBuf>,

  /// TrueType font used for the letters of a saved image.
  #[arg(long, value_name = "TTF")]
  pub font: Option<PathBuf>,

  /// Stop searching after this many seconds.
  #[arg(long, value_name = "SECONDS")]
  pub time_limit: Option<f64>,

  /// Stop searching after exploring this many search nodes.
  #[arg(long, value_name = "N")]
  pub node_limit: Option<u64>,

  /// Print search statistics after solving.
  #[arg(long)]
  pub stats: bool,

  #[arg(long)]
  pub debug: bool,
}
