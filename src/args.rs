use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use xword_gen::{Inference, SolveConfig};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferenceMode {
  None,
  /// Maintain arc consistency after every assignment.
  Mac,
}

#[derive(Parser, Debug)]
#[command(version, about = "Fill a crossword structure from a word list", long_about = None)]
pub struct Args {
  /// Structure file: one row per line, `_` for fillable cells, `#` for walls.
  pub structure: PathBuf,

  /// Word list, one word per line.
  pub words: PathBuf,

  /// Where to save the filled letter grid, bitcode-encoded.
  #[arg(long)]
  pub output: Option<PathBuf>,

  #[arg(long, value_enum, default_value = "none")]
  pub inference: InferenceMode,

  #[arg(short, long)]
  pub verbose: bool,
}

impl Args {
  pub fn solve_config(&self) -> SolveConfig {
    SolveConfig {
      inference: match self.inference {
        InferenceMode::None => Inference::None,
        InferenceMode::Mac => Inference::MaintainArcConsistency,
      },
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::path::PathBuf;

  use clap::Parser;
  use googletest::prelude::*;
  use xword_gen::{Inference, SolveConfig};

  use super::{Args, InferenceMode};

  #[gtest]
  fn test_defaults() {
    let args = Args::try_parse_from(["xword-fill", "structure.txt", "words.txt"]).unwrap();
    expect_that!(args.structure, eq(&PathBuf::from("structure.txt")));
    expect_that!(args.words, eq(&PathBuf::from("words.txt")));
    expect_that!(args.output, none());
    expect_that!(args.inference, eq(InferenceMode::None));
    expect_false!(args.verbose);
    expect_that!(args.solve_config(), eq(SolveConfig::default()));
  }

  #[gtest]
  fn test_inference_flag() {
    let args = Args::try_parse_from([
      "xword-fill",
      "structure.txt",
      "words.txt",
      "--inference",
      "mac",
      "--output",
      "out.bin",
    ])
    .unwrap();
    expect_that!(
      args.solve_config().inference,
      eq(Inference::MaintainArcConsistency)
    );
    expect_that!(args.output, some(eq(&PathBuf::from("out.bin"))));
  }

  #[gtest]
  fn test_missing_words() {
    expect_that!(Args::try_parse_from(["xword-fill", "structure.txt"]), err(anything()));
  }
}
