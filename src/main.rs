#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;

use std::{
  fs::{self, File},
  io::Write,
  path::Path,
};

use args::Args;
use clap::Parser;
use log::info;
use util::{
  bitcode,
  error::{XWordError, XWordResult},
  grid::Grid,
  time::time_fn,
};
use xword_dict::XWordDict;
use xword_gen::{XWord, XWordStructure};

fn read_structure(path: &Path) -> XWordResult<XWordStructure> {
  let layout = fs::read_to_string(path).map_err(|err| {
    XWordError::Parse(format!("Failed to read structure {}: {err}", path.display()))
  })?;
  XWordStructure::from_layout(&layout)
}

fn save_letter_grid(letters: &Grid<Option<char>>, path: &Path) -> XWordResult {
  let result = bitcode::encode(letters);
  let mut file = File::create(path)?;
  file.write_all(&result)?;
  Ok(())
}

fn main() -> XWordResult {
  let args = Args::parse();
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
  )
  .init();

  let structure = read_structure(&args.structure)?;
  let dict = XWordDict::from_file(&args.words)?;
  info!(
    "Loaded {} words, lengths {:?}",
    dict.len(),
    dict.length_histogram()
  );
  let xword = XWord::from_dict(structure, dict);

  let (time, (assignment, _)) = time_fn(|| xword.solve_with(args.solve_config()));
  info!("Took {}s", time.as_secs_f32());

  match assignment {
    Some(assignment) => {
      let filled = xword.display(&assignment);
      print!("{filled}");
      if let Some(output) = &args.output {
        save_letter_grid(filled.letters(), output)?;
      }
    }
    None => println!("No solution."),
  }

  Ok(())
}
