//! The `zen` binary: runs the resolver and tracker over a file and prints
//! JSON.

mod cli;
mod run;

use std::io::Write;

use anyhow::Context as _;
use clap::Parser;
use cli::{Cli, Command};
use run::Document;
use serde::Serialize;
use tracing::info;
use zen_abbrev::Engine;
use zen_core::Config;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let mut config = match &cli.config {
		Some(path) => Config::load(path).with_context(|| format!("failed to load config {}", path.display()))?,
		None => Config::default(),
	};
	let file = cli.command.file();
	if let Some(syntax) = cli.syntax.or_else(|| run::detect_syntax(file)) {
		config.syntax = syntax;
	}

	let text = std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
	info!(file = %file.display(), syntax = %config.syntax, "zen.open");

	let engine = Engine::new(config.snippets.clone());
	let mut doc = Document::new(&text, config)?;
	let mut out = std::io::stdout().lock();

	match cli.command {
		Command::Context { pos, .. } => print_json(&mut out, &run::context(&doc, pos)?)?,
		Command::Expand { pos, .. } => print_json(&mut out, &run::expand(&doc, pos, &engine)?)?,
		Command::Type { pos, text, commit, .. } => {
			let keystrokes = run::type_text(&mut doc, pos, &text, &engine)?;
			for keystroke in &keystrokes {
				print_json(&mut out, keystroke)?;
			}
			if commit {
				let applied = run::commit(&mut doc, &keystrokes, &engine)?;
				print_json(&mut out, &applied)?;
				write!(out, "{}", doc.text)?;
			}
		}
	}
	Ok(())
}

/// Writes `value` as one line of JSON.
fn print_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
	serde_json::to_writer(&mut *out, value)?;
	writeln!(out)?;
	Ok(())
}

fn setup_tracing(verbose: bool) {
	tracing_subscriber::fmt()
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.init();
}
