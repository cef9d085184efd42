// SPDX-License-Identifier: MIT
//
// keyano: headless host for the keyano-core engine.
//
// Loads a buffer (a file, or cursor notation via --text), replays a key
// script through the dispatcher, and prints the result:
//
//   keyano --text 'fo|o bar' --keys ew        →  <|foo|> bar
//   keyano notes.md --keys 'aw' --in-place
//
// Each key flows through:
//
//   --keys → keys::parse → Dispatcher::handle_key → TextBuffer edits
//
// stdout carries the final buffer in cursor notation. Pending jump labels
// and the final mode go to stderr.

mod config;
mod keys;
mod log;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use keyano_core::{Bindings, Buffer, Dispatcher, Layout, RecordedDecorations};
use tracing::info;

use crate::config::Config;
use crate::keys::Key;

#[derive(Debug, Parser)]
#[command(name = "keyano", version, about = "Replay keyano key chords over a buffer")]
struct Cli {
    /// File to load. Without it the buffer comes from --text.
    file: Option<PathBuf>,

    /// Initial buffer in cursor notation, e.g. 'fo|o <|bar|>'.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Keys to replay. `\e` is escape, `\n` enter.
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Keyboard layout, overriding keyano.toml.
    #[arg(long, env = "KEYANO_LAYOUT")]
    layout: Option<String>,

    /// Config file path. Defaults to ./keyano.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the edited text back to FILE.
    #[arg(long, requires = "file")]
    in_place: bool,

    /// Print plain text instead of cursor notation.
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_overrides(cli.config.as_deref(), Some(Path::new(config::FILE_NAME)))?;
    if let Err(err) = log::init(config.log.as_deref()) {
        eprintln!("keyano: logging disabled: {err}");
    }

    let layout = match &cli.layout {
        Some(name) => name.parse::<Layout>().context("Invalid --layout")?,
        None => config.layout()?,
    };
    let script = keys::parse(&cli.keys)?;

    let mut buffer = load_buffer(&cli)?;
    let mut labels = RecordedDecorations::default();
    let mut dispatcher = Dispatcher::new(Bindings::default(), layout);
    info!(%layout, keys = script.len(), "replaying");

    for key in script {
        match key {
            Key::Char(ch) => dispatcher.handle_key(ch, &mut buffer, &mut labels),
            Key::Escape => dispatcher.escape(&mut labels),
        }
    }

    if cli.in_place {
        buffer.save().context("Failed to write file")?;
    }

    if cli.plain {
        print!("{}", buffer.contents());
    } else {
        println!("{}", buffer.to_notation());
    }

    for target in &labels.shown {
        eprintln!("{} {}", target.label, target.range);
    }
    eprintln!("-- {} --", dispatcher.mode());
    Ok(())
}

fn load_buffer(cli: &Cli) -> Result<Buffer> {
    if let Some(path) = &cli.file {
        return Buffer::from_file(path).with_context(|| format!("Failed to read {}", path.display()));
    }
    let text = cli.text.as_deref().unwrap_or("");
    Buffer::from_notation(text).context("Invalid --text")
}
