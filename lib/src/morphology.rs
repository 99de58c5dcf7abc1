use std::fmt::Debug;

use hashbrown::HashMap;

/// Word class whose members are never lemmatized by rule.
pub const NONE_CLASS: &str = "none";

/// Word class holding whole-word compound exceptions.
pub const COMPOUND_CLASS: &str = "compound";

/// Word class applied when a tag resolves to no class.
pub const DEFAULT_CLASS: &str = "default";

/// Separator joining tags of a compound tag.
pub const TAG_SEPARATOR: char = '|';

pub trait MorphologicalAnalyzer: Debug + Send + Sync {
    /// Whether `spelling` should be returned unchanged by the rule fallback.
    fn cant_lemmatize(&self, spelling: &str) -> bool;

    /// Lemmatization word class for `tag`. Empty means the default class.
    fn lemma_word_class(&self, tag: &str) -> String;
}

pub trait TagIntrospector: Debug + Send + Sync {
    /// Whether `tag` stands for more than one morphosyntactic unit.
    fn is_compound_tag(&self, tag: &str) -> bool;

    fn split_tag(&self, tag: &str) -> Vec<String>;
}

/// Table-driven English word classes.
#[derive(Clone, Debug, Default)]
pub struct EnglishMorphology {
    word_classes: HashMap<String, String>,
}

impl EnglishMorphology {
    pub fn new(word_classes: HashMap<String, String>) -> Self {
        Self { word_classes }
    }
}

impl MorphologicalAnalyzer for EnglishMorphology {
    fn cant_lemmatize(&self, spelling: &str) -> bool {
        !spelling.chars().any(char::is_alphabetic) || spelling.chars().any(|ch| ch.is_ascii_digit())
    }

    fn lemma_word_class(&self, tag: &str) -> String {
        self.word_classes.get(tag).cloned().unwrap_or_default()
    }
}

/// Compound tags are component tags joined with `|`, e.g. `vdb|xx`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BarTagIntrospector;

impl BarTagIntrospector {
    pub fn new() -> Self {
        Self
    }
}

impl TagIntrospector for BarTagIntrospector {
    fn is_compound_tag(&self, tag: &str) -> bool {
        tag.split(TAG_SEPARATOR).filter(|part| !part.is_empty()).count() > 1
    }

    fn split_tag(&self, tag: &str) -> Vec<String> {
        tag.split(TAG_SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::{BarTagIntrospector, EnglishMorphology, MorphologicalAnalyzer, TagIntrospector};

    #[test]
    fn test_cant_lemmatize() {
        let morphology = EnglishMorphology::default();
        assert!(morphology.cant_lemmatize("."));
        assert!(morphology.cant_lemmatize("1990s"));
        assert!(morphology.cant_lemmatize(""));
        assert!(!morphology.cant_lemmatize("running"));
        assert!(!morphology.cant_lemmatize("don't"));
    }

    #[test]
    fn test_lemma_word_class() {
        let mut classes = HashMap::new();
        classes.insert("NNS".to_string(), "noun".to_string());
        classes.insert("NNP".to_string(), "none".to_string());

        let morphology = EnglishMorphology::new(classes);
        assert_eq!(morphology.lemma_word_class("NNS"), "noun");
        assert_eq!(morphology.lemma_word_class("NNP"), "none");
        assert_eq!(morphology.lemma_word_class("vdb|xx"), "");
    }

    #[test]
    fn test_compound_tags() {
        let introspector = BarTagIntrospector::new();
        assert!(introspector.is_compound_tag("vdb|xx"));
        assert!(!introspector.is_compound_tag("vdb"));
        assert!(!introspector.is_compound_tag("|"));
        assert_eq!(introspector.split_tag("vmb|xx|pns12"), vec!["vmb", "xx", "pns12"]);
    }
}
