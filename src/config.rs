use std::{fs, num::NonZeroUsize, path::Path};

use lemmata::{LemmatizationResolver, ResourcePaths, Resources, Strategy};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};

/// Runtime configuration read from a JSON file. Every field is optional.
///
/// ```json
/// {
///   "resources": {
///     "lexicon": "data/lexicon.tsv",
///     "penn_to_nupos": "data/penn_to_nupos.tsv",
///     "major_classes": "data/major_classes.tsv",
///     "word_classes": "data/word_classes.tsv",
///     "rules": "data/rules.tsv"
///   },
///   "strategy": "lexicon-and-rules",
///   "threads": 4
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resource tables on disk. The embedded tables are used when absent.
    pub resources: Option<ResourcePaths>,
    pub strategy: Strategy,
    pub threads: Option<NonZeroUsize>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let buffer =
            fs::read_to_string(path).map_err(|error| ConfigError::File(error.kind()))?;

        Self::from_json(&buffer)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|error| ConfigError::Serialization(error.to_string()).into())
    }

    pub fn resolver(&self) -> Result<LemmatizationResolver, Error> {
        let resources = match &self.resources {
            Some(paths) => Resources::load(paths)?,
            None => Resources::embedded()?,
        };

        Ok(LemmatizationResolver::from_resources(resources))
    }

    /// Configured worker count, else the available parallelism.
    pub fn threads(&self) -> NonZeroUsize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
        })
    }
}
