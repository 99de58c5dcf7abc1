extern crate clap;

use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, Subcommand};
use lemmata::Strategy;

#[derive(Debug, Parser)]
#[command(name = "lemmata", version, about = "Resolve the lemmas of words")]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// lexicon, rules or lexicon-and-rules.
    #[arg(long, short = 's', global = true, value_parser = parse_strategy)]
    pub strategy: Option<Strategy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lemmatize a single spelling.
    Word(Word),

    /// Lemmatize every `spelling [POS]` line of a file.
    Batch(Batch),
}

#[derive(Debug, Parser)]
pub struct Word {
    pub spelling: String,

    pub pos: Option<String>,

    /// Print every lemma/tag/tag-set triple.
    #[arg(long, short = 'f', conflicts_with = "json")]
    pub full: bool,

    #[arg(long, short = 'j')]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct Batch {
    pub input: PathBuf,

    #[arg(long, short = 't')]
    pub threads: Option<NonZeroUsize>,

    /// Print every lemma/tag/tag-set triple.
    #[arg(long, short = 'f')]
    pub full: bool,
}

fn parse_strategy(value: &str) -> Result<Strategy, String> {
    value
        .parse::<Strategy>()
        .map_err(|error| error.to_string())
}
