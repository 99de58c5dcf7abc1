use std::fmt::{Display, Formatter};

use hashbrown::HashMap;
use serde::Serialize;

use crate::{hierarchy::TagHierarchy, lexicon::LexiconStore};

/// Synthetic tag used for lemmas resolved without a part of speech.
pub const NO_TAG: &str = "NONE";

/// The tag vocabulary a tag string belongs to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
pub enum TagSet {
    #[serde(rename = "PennPOS")]
    Penn,
    #[serde(rename = "NUPOS")]
    Nupos,
    #[serde(rename = "NONE")]
    None,
}

impl TagSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagSet::Penn => "PennPOS",
            TagSet::Nupos => "NUPOS",
            TagSet::None => "NONE",
        }
    }
}

impl Display for TagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels tag strings with the vocabulary they come from.
///
/// Lexicon categories are registered as NUPOS first, then every Penn key of
/// the hierarchy as PennPOS, so a tag present in both ends up PennPOS.
#[derive(Clone, Debug, Default)]
pub struct TagSetClassifier {
    labels: HashMap<String, TagSet>,
}

impl TagSetClassifier {
    pub fn new(lexicon: &LexiconStore, hierarchy: &TagHierarchy) -> Self {
        let mut labels = HashMap::new();

        lexicon.categories().for_each(|category| {
            labels.insert(category.to_string(), TagSet::Nupos);
        });

        hierarchy.penn_tags().for_each(|tag| {
            if let Some(TagSet::Nupos) = labels.insert(tag.to_string(), TagSet::Penn) {
                log::debug!("tag {tag:?} is both a lexicon category and a Penn tag");
            }
        });

        Self { labels }
    }

    pub fn classify(&self, tag: &str) -> TagSet {
        if tag.is_empty() {
            return TagSet::None;
        }

        self.labels.get(tag).copied().unwrap_or(TagSet::None)
    }
}
