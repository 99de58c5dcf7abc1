//! Tab-separated resource tables. `#` lines and blank lines are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::LoadError,
    hierarchy::TagHierarchy,
    lexicon::LexiconStore,
    rules::{Rule, RuleEngine, RuleKind},
};

const EMBEDDED_LEXICON: &str = include_str!("../assets/lexicon.tsv");
const EMBEDDED_PENN_TO_NUPOS: &str = include_str!("../assets/penn_to_nupos.tsv");
const EMBEDDED_MAJOR_CLASSES: &str = include_str!("../assets/major_classes.tsv");
const EMBEDDED_WORD_CLASSES: &str = include_str!("../assets/word_classes.tsv");
const EMBEDDED_RULES: &str = include_str!("../assets/rules.tsv");

/// Locations of the resource tables on disk.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourcePaths {
    pub lexicon: PathBuf,
    pub penn_to_nupos: PathBuf,
    pub major_classes: PathBuf,
    pub word_classes: PathBuf,
    pub rules: PathBuf,
}

impl ResourcePaths {
    /// Conventional file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            lexicon: dir.join("lexicon.tsv"),
            penn_to_nupos: dir.join("penn_to_nupos.tsv"),
            major_classes: dir.join("major_classes.tsv"),
            word_classes: dir.join("word_classes.tsv"),
            rules: dir.join("rules.tsv"),
        }
    }
}

/// Every table the resolver is built from.
#[derive(Clone, Debug)]
pub struct Resources {
    pub lexicon: LexiconStore,
    pub hierarchy: TagHierarchy,
    pub rules: RuleEngine,
    pub word_classes: HashMap<String, String>,
}

impl Resources {
    /// The English tables compiled into the crate.
    pub fn embedded() -> Result<Self, LoadError> {
        Self::read(
            EMBEDDED_LEXICON.as_bytes(),
            EMBEDDED_PENN_TO_NUPOS.as_bytes(),
            EMBEDDED_MAJOR_CLASSES.as_bytes(),
            EMBEDDED_WORD_CLASSES.as_bytes(),
            EMBEDDED_RULES.as_bytes(),
        )
    }

    pub fn load(paths: &ResourcePaths) -> Result<Self, LoadError> {
        Self::read(
            open(&paths.lexicon)?,
            open(&paths.penn_to_nupos)?,
            open(&paths.major_classes)?,
            open(&paths.word_classes)?,
            open(&paths.rules)?,
        )
    }

    fn read(
        lexicon: impl BufRead,
        penn_to_nupos: impl BufRead,
        major_classes: impl BufRead,
        word_classes: impl BufRead,
        rules: impl BufRead,
    ) -> Result<Self, LoadError> {
        let lexicon = read_lexicon(lexicon)?;
        let hierarchy = TagHierarchy::new(
            read_tag_lists(penn_to_nupos, "penn to nupos map")?,
            read_tag_lists(major_classes, "major class table")?,
        )?;
        let word_classes = read_word_classes(word_classes)?;
        let rules = read_rules(rules)?;

        log::info!(
            "loaded {} spellings, {} penn tags, {} word classes, {} rules",
            lexicon.len(),
            hierarchy.penn_tags().count(),
            word_classes.len(),
            rules.len()
        );

        Ok(Self {
            lexicon,
            hierarchy,
            rules,
            word_classes,
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|error| LoadError::File {
            path: path.display().to_string(),
            kind: error.kind(),
        })
}

/// Visits each content line as `(line number, tab-separated fields)`.
fn for_each_record<R, F>(reader: R, resource: &'static str, mut f: F) -> Result<(), LoadError>
where
    R: BufRead,
    F: FnMut(usize, Vec<&str>) -> Result<(), LoadError>,
{
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|error| LoadError::File {
            path: resource.to_string(),
            kind: error.kind(),
        })?;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        f(index + 1, line.split('\t').collect())?;
    }

    Ok(())
}

pub fn read_lexicon(reader: impl BufRead) -> Result<LexiconStore, LoadError> {
    const RESOURCE: &str = "lexicon";
    let mut lexicon = LexiconStore::new();

    for_each_record(reader, RESOURCE, |line, fields| {
        let [spelling, tag, lemma] = fields[..] else {
            return Err(LoadError::malformed(
                RESOURCE,
                line,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        if spelling.is_empty() || tag.is_empty() || lemma.is_empty() {
            return Err(LoadError::malformed(RESOURCE, line, "empty field"));
        }

        if !lexicon.insert(spelling, tag, lemma) {
            log::warn!("lexicon line {line}: duplicate category {tag:?} for {spelling:?} ignored");
        }
        Ok(())
    })?;

    Ok(lexicon)
}

/// Reads `key<TAB>tag tag ...` rows, keeping file order.
pub fn read_tag_lists(
    reader: impl BufRead,
    resource: &'static str,
) -> Result<Vec<(String, Vec<String>)>, LoadError> {
    let mut rows = Vec::new();

    for_each_record(reader, resource, |line, fields| {
        let (key, tags) = match fields[..] {
            [key] => (key, ""),
            [key, tags] => (key, tags),
            _ => {
                return Err(LoadError::malformed(
                    resource,
                    line,
                    format!("expected 1 or 2 fields, found {}", fields.len()),
                ))
            }
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(LoadError::malformed(resource, line, "empty key"));
        }

        let tags = tags.split_whitespace().map(ToString::to_string).collect();
        rows.push((key.to_string(), tags));
        Ok(())
    })?;

    Ok(rows)
}

pub fn read_word_classes(reader: impl BufRead) -> Result<HashMap<String, String>, LoadError> {
    const RESOURCE: &str = "word class table";
    let mut classes = HashMap::new();

    for_each_record(reader, RESOURCE, |line, fields| {
        let [tag, class] = fields[..] else {
            return Err(LoadError::malformed(
                RESOURCE,
                line,
                format!("expected 2 fields, found {}", fields.len()),
            ));
        };

        if tag.is_empty() || class.is_empty() {
            return Err(LoadError::malformed(RESOURCE, line, "empty field"));
        }

        classes.insert(tag.to_string(), class.to_string());
        Ok(())
    })?;

    Ok(classes)
}

pub fn read_rules(reader: impl BufRead) -> Result<RuleEngine, LoadError> {
    const RESOURCE: &str = "rule file";
    let mut engine = RuleEngine::new();

    for_each_record(reader, RESOURCE, |line, fields| {
        if !(3..=5).contains(&fields.len()) {
            return Err(LoadError::malformed(
                RESOURCE,
                line,
                format!("expected 3 to 5 fields, found {}", fields.len()),
            ));
        }

        let class = fields[0];
        let kind = fields[1]
            .parse::<RuleKind>()
            .map_err(|reason| LoadError::malformed(RESOURCE, line, reason))?;
        let pattern = fields[2];
        let replacement = fields.get(3).copied().unwrap_or_default();

        if class.is_empty() || pattern.is_empty() {
            return Err(LoadError::malformed(RESOURCE, line, "empty class or pattern"));
        }

        let rule = match kind {
            RuleKind::Irregular if replacement.is_empty() => {
                return Err(LoadError::malformed(
                    RESOURCE,
                    line,
                    "irregular rule without a lemma",
                ))
            }
            RuleKind::Irregular => Rule::irregular(pattern, replacement),
            RuleKind::Suffix => match fields.get(4) {
                Some(min_stem) => {
                    let min_stem = min_stem.parse::<usize>().map_err(|_| {
                        LoadError::malformed(RESOURCE, line, format!("bad stem length {min_stem:?}"))
                    })?;
                    Rule::suffix(pattern, replacement).with_min_stem(min_stem)
                }
                None => Rule::suffix(pattern, replacement),
            },
        };

        engine.insert(class, rule);
        Ok(())
    })?;

    Ok(engine)
}
