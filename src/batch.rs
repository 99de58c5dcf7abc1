extern crate crossbeam_channel;

use std::{io::BufRead, num::NonZeroUsize, sync::Arc, thread};

use crossbeam_channel::{unbounded, Sender};
use lemmata::{
    tokenizer::{TextTokenizer, Whitespace},
    LemmataEntry, LemmatizationResolver, Strategy,
};

use crate::error::{Error, IoError};

#[derive(Debug)]
struct Request {
    index: usize,
    spelling: String,
    pos: Option<String>,
}

/// One resolved input line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub spelling: String,
    pub pos: Option<String>,
    pub entry: LemmataEntry,
}

impl Line {
    /// `spelling<TAB>pos<TAB>lemmas`, with the full view when `full` is set.
    pub fn render(&self, full: bool) -> String {
        let lemmas = if full {
            self.entry.to_string()
        } else {
            self.entry.lemmas_to_string()
        };

        format!(
            "{}\t{}\t{}",
            self.spelling,
            self.pos.as_deref().unwrap_or_default(),
            lemmas
        )
    }
}

/// Splits an input line into a spelling and an optional tag. Blank lines
/// and `#` comments yield `None`.
pub fn parse_line(tokenizer: &Whitespace, line: &str) -> Option<(String, Option<String>)> {
    if line.trim_start().starts_with('#') {
        return None;
    }

    let tokens = tokenizer.tokenize(line);
    if tokens.count() > 2 {
        log::warn!("ignoring trailing fields in {line:?}");
    }

    let spelling = tokens.get(0)?.as_str().to_string();
    let pos = tokens.get(1).map(|token| token.as_str().to_string());

    Some((spelling, pos))
}

fn send_requests<R: BufRead>(reader: R, requests: &Sender<Request>) -> Result<usize, Error> {
    let tokenizer = Whitespace::new();
    let mut count = 0;

    for line in reader.lines() {
        let line = line.map_err(|error| IoError::Reader(error.kind()))?;

        if let Some((spelling, pos)) = parse_line(&tokenizer, &line) {
            let request = Request {
                index: count,
                spelling,
                pos,
            };

            requests.send(request).map_err(|_| Error::Worker)?;
            count += 1;
        }
    }

    Ok(count)
}

/// Resolves every line of `reader` on `threads` workers.
pub fn run<R: BufRead>(
    resolver: Arc<LemmatizationResolver>,
    strategy: Strategy,
    reader: R,
    threads: NonZeroUsize,
) -> Result<Vec<Line>, Error> {
    let (request_tx, request_rx) = unbounded::<Request>();
    let (result_tx, result_rx) = unbounded::<(usize, Line)>();

    let workers = (0..threads.get())
        .map(|_| {
            let request_rx = request_rx.clone();
            let result_tx = result_tx.clone();
            let resolver = resolver.clone();

            thread::spawn(move || {
                for request in request_rx.iter() {
                    let pos = request.pos.as_deref().unwrap_or_default();
                    let entry = resolver.resolve(strategy, &request.spelling, pos);

                    let line = Line {
                        spelling: request.spelling,
                        pos: request.pos,
                        entry,
                    };

                    if result_tx.send((request.index, line)).is_err() {
                        break;
                    }
                }
            })
        })
        .collect::<Vec<_>>();

    drop(request_rx);
    drop(result_tx);

    log::debug!("started {} batch workers", workers.len());

    let sent = send_requests(reader, &request_tx);
    drop(request_tx);

    let mut lines = result_rx.iter().collect::<Vec<_>>();

    for worker in workers {
        worker.join().map_err(|_| Error::Worker)?;
    }

    let count = sent?;
    if lines.len() != count {
        return Err(Error::Worker);
    }

    lines.sort_unstable_by_key(|(index, _)| *index);
    log::info!("resolved {count} lines");

    Ok(lines.into_iter().map(|(_, line)| line).collect())
}
