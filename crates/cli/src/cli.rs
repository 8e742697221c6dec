//! CLI schema for the zen binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zen_abbrev::Syntax;

#[derive(Parser, Debug)]
#[command(name = "zen")]
#[command(about = "Inspect markup and stylesheet contexts and expand abbreviations")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// TOML configuration file
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Document syntax (defaults to the file extension, then the config)
	#[arg(long, short = 's', global = true)]
	pub syntax: Option<Syntax>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the context, activation settings and enclosing tag at a position
	Context {
		file: PathBuf,
		/// Character offset
		#[arg(long, short = 'p')]
		pos: usize,
	},
	/// Expand the abbreviation left of a position
	Expand {
		file: PathBuf,
		/// Character offset
		#[arg(long, short = 'p')]
		pos: usize,
	},
	/// Type text at a position one character at a time and print the
	/// tracker after every keystroke
	Type {
		file: PathBuf,
		/// Character offset
		#[arg(long, short = 'p')]
		pos: usize,
		/// Text to type
		text: String,
		/// Press Tab after typing and print the resulting document
		#[arg(long)]
		commit: bool,
	},
}

impl Command {
	pub fn file(&self) -> &PathBuf {
		match self {
			Command::Context { file, .. } | Command::Expand { file, .. } | Command::Type { file, .. } => file,
		}
	}
}
