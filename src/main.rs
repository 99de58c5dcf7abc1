extern crate clap;
extern crate env_logger;

use std::{
    fs::File,
    io::{self, BufReader, Write},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use lemmata_repo::{
    batch,
    cli::{Cli, Command},
    config::Config,
    error::{Error, IoError},
};

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            eprintln!("lemmata: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }

    let resolver = config.resolver()?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Word(word) => {
            let pos = word.pos.as_deref().unwrap_or_default();
            let entry = resolver.resolve(config.strategy, &word.spelling, pos);

            let output = if word.json {
                serde_json::to_string(&entry)?
            } else if word.full {
                entry.to_string()
            } else {
                entry.lemmas_to_string()
            };

            writeln!(stdout, "{output}").map_err(|error| IoError::Writer(error.kind()))?;
        }

        Command::Batch(args) => {
            let file = File::open(&args.input).map_err(|error| IoError::File(error.kind()))?;
            let threads = args.threads.unwrap_or_else(|| config.threads());

            let lines = batch::run(
                Arc::new(resolver),
                config.strategy,
                BufReader::new(file),
                threads,
            )?;

            for line in &lines {
                writeln!(stdout, "{}", line.render(args.full))
                    .map_err(|error| IoError::Writer(error.kind()))?;
            }
        }
    }

    Ok(())
}
