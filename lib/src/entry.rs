use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::tag::TagSet;

/// Separator between lemmas in serialized output.
pub const LEMMA_SEPARATOR: &str = "||";

/// Rendering of a tag with no lemma.
pub const NOT_FOUND: &str = "*";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Lemmata {
    pub tag: String,
    pub lemma: Option<String>,
    pub tag_set: TagSet,
}

impl Lemmata {
    pub fn lemma_or_sentinel(&self) -> &str {
        self.lemma.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Lemmas resolved for one spelling, keyed by tag in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct LemmataEntry {
    entries: Vec<Lemmata>,
}

impl LemmataEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lemma for `tag`, replacing any earlier one.
    pub fn insert(&mut self, tag: impl Into<String>, lemma: Option<String>, tag_set: TagSet) {
        let tag = tag.into();

        match self.entries.iter_mut().find(|entry| entry.tag == tag) {
            Some(entry) => {
                entry.lemma = lemma;
                entry.tag_set = tag_set;
            }
            None => self.entries.push(Lemmata {
                tag,
                lemma,
                tag_set,
            }),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lemmata> {
        self.entries.iter()
    }

    pub fn get(&self, tag: &str) -> Option<&Lemmata> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// First lemma that was found.
    pub fn lemma(&self) -> Option<&str> {
        self.entries.iter().find_map(|entry| entry.lemma.as_deref())
    }

    /// Whether any tag has a lemma.
    pub fn is_found(&self) -> bool {
        self.lemma().is_some()
    }

    /// Each distinct lemma once, joined by [`LEMMA_SEPARATOR`].
    pub fn lemmas_to_string(&self) -> String {
        let mut lemmas: Vec<&str> = Vec::with_capacity(self.entries.len());

        self.entries.iter().for_each(|entry| {
            let lemma = entry.lemma_or_sentinel();
            if !lemmas.contains(&lemma) {
                lemmas.push(lemma);
            }
        });

        if lemmas.is_empty() {
            return NOT_FOUND.to_string();
        }

        lemmas.join(LEMMA_SEPARATOR)
    }
}

impl<'a> IntoIterator for &'a LemmataEntry {
    type Item = &'a Lemmata;
    type IntoIter = std::slice::Iter<'a, Lemmata>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Full view: every `lemma/tag/tag-set` triple joined by [`LEMMA_SEPARATOR`].
impl Display for LemmataEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.entries.is_empty() {
            return f.write_str(NOT_FOUND);
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(LEMMA_SEPARATOR)?;
            }
            write!(
                f,
                "{}/{}/{}",
                entry.lemma_or_sentinel(),
                entry.tag,
                entry.tag_set
            )?;
        }

        Ok(())
    }
}
