use hashbrown::{HashMap, HashSet};
use serde::Serialize;

/// One (category, lemma) pair recorded for a spelling.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Category {
    pub tag: String,
    pub lemma: String,
}

/// Spelling to (category, lemma) pairs.
///
/// Case variants are distinct keys, so "The" and "the" may carry different
/// categories.
#[derive(Clone, Debug, Default)]
pub struct LexiconStore {
    entries: HashMap<String, Vec<Category>>,
    categories: Vec<String>,
}

impl LexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a category for `spelling`. Returns `false` when the spelling
    /// already has that category, in which case the first lemma is kept.
    pub fn insert(
        &mut self,
        spelling: impl Into<String>,
        tag: impl Into<String>,
        lemma: impl Into<String>,
    ) -> bool {
        let tag = tag.into();
        let categories = self.entries.entry(spelling.into()).or_default();

        if categories.iter().any(|category| category.tag == tag) {
            return false;
        }

        if !self.categories.contains(&tag) {
            self.categories.push(tag.clone());
        }

        categories.push(Category {
            tag,
            lemma: lemma.into(),
        });
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories, in the order they were first seen.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Lower-cased set of every lemma in the lexicon.
    pub fn lemma_set(&self) -> HashSet<String> {
        self.entries
            .values()
            .flatten()
            .map(|category| category.lemma.to_lowercase())
            .collect()
    }

    fn exact(&self, spelling: &str, tag: &str) -> Option<&str> {
        self.entries.get(spelling).and_then(|categories| {
            categories
                .iter()
                .find(|category| category.tag == tag)
                .map(|category| category.lemma.as_str())
        })
    }

    /// Lemma of `spelling` under `tag`, trying the literal spelling and then
    /// its upper-cased form.
    pub fn lemma(&self, spelling: &str, tag: &str) -> Option<&str> {
        self.exact(spelling, tag)
            .or_else(|| self.exact(&spelling.to_uppercase(), tag))
    }

    /// Every category of `spelling`, trying the literal, upper-cased and
    /// lower-cased spellings in that order. The first variant with any
    /// category is returned whole.
    pub fn lemmas_and_categories(&self, spelling: &str) -> &[Category] {
        [
            spelling.to_string(),
            spelling.to_uppercase(),
            spelling.to_lowercase(),
        ]
        .iter()
        .find_map(|variant| {
            self.entries
                .get(variant.as_str())
                .filter(|categories| !categories.is_empty())
        })
        .map(Vec::as_slice)
        .unwrap_or(&[])
    }
}

impl<S: Into<String>> FromIterator<(S, S, S)> for LexiconStore {
    fn from_iter<I: IntoIterator<Item = (S, S, S)>>(iter: I) -> Self {
        let mut lexicon = LexiconStore::new();
        iter.into_iter().for_each(|(spelling, tag, lemma)| {
            lexicon.insert(spelling, tag, lemma);
        });
        lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::LexiconStore;

    fn lexicon() -> LexiconStore {
        [
            ("the", "dt", "the"),
            ("the", "av", "the"),
            ("US", "np1", "US"),
            ("us", "pno12", "we"),
            ("mice", "n2", "mouse"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lexicon_lemma_exact() {
        let lexicon = lexicon();
        assert_eq!(lexicon.lemma("mice", "n2"), Some("mouse"));
        assert_eq!(lexicon.lemma("mice", "n1"), None);
    }

    #[test]
    fn test_lexicon_lemma_upper_case_fallback() {
        let lexicon = lexicon();
        assert_eq!(lexicon.lemma("Us", "np1"), Some("US"));
        // The tagged lookup never lower-cases.
        assert_eq!(lexicon.lemma("Mice", "n2"), None);
    }

    #[test]
    fn test_lexicon_lemmas_and_categories_order() {
        let lexicon = lexicon();

        let literal = lexicon.lemmas_and_categories("us");
        assert_eq!(literal.len(), 1);
        assert_eq!(literal[0].lemma, "we");

        let upper = lexicon.lemmas_and_categories("Us");
        assert_eq!(upper[0].lemma, "US");

        let lower = lexicon.lemmas_and_categories("The");
        assert_eq!(lower.len(), 2);
        assert_eq!(lower[0].tag, "dt");
        assert_eq!(lower[1].tag, "av");

        assert!(lexicon.lemmas_and_categories("zebra").is_empty());
    }

    #[test]
    fn test_lexicon_duplicate_category_keeps_first() {
        let mut lexicon = lexicon();
        assert!(!lexicon.insert("mice", "n2", "mices"));
        assert_eq!(lexicon.lemma("mice", "n2"), Some("mouse"));
    }

    #[test]
    fn test_lexicon_categories_and_lemma_set() {
        let lexicon = lexicon();

        let categories = lexicon.categories().collect::<Vec<_>>();
        assert_eq!(categories, vec!["dt", "av", "np1", "pno12", "n2"]);

        let lemmas = lexicon.lemma_set();
        assert!(lemmas.contains("us"));
        assert!(lemmas.contains("mouse"));
        assert!(!lemmas.contains("US"));
    }
}
