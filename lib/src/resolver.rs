//! Lexicon stages then rule fallback for one spelling and tag.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    entry::{LemmataEntry, LEMMA_SEPARATOR},
    error::Error,
    hierarchy::TagHierarchy,
    lexicon::{Category, LexiconStore},
    loader::Resources,
    morphology::{
        BarTagIntrospector, EnglishMorphology, MorphologicalAnalyzer, TagIntrospector,
        COMPOUND_CLASS, NONE_CLASS,
    },
    rules::RuleEngine,
    tag::{TagSet, TagSetClassifier, NO_TAG},
    tokenizer::{Contraction, TextTokenizer},
};

/// Deepest nesting of compound resolution before the single-unit rules are
/// used instead.
pub const MAX_COMPOUND_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Lexicon,
    Rules,
    #[default]
    LexiconAndRules,
}

impl Strategy {
    #[inline]
    pub fn uses_lexicon(self) -> bool {
        matches!(self, Strategy::Lexicon | Strategy::LexiconAndRules)
    }

    #[inline]
    pub fn uses_rules(self) -> bool {
        matches!(self, Strategy::Rules | Strategy::LexiconAndRules)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Lexicon => "lexicon",
            Strategy::Rules => "rules",
            Strategy::LexiconAndRules => "lexicon-and-rules",
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexicon" => Ok(Strategy::Lexicon),
            "rules" => Ok(Strategy::Rules),
            "lexicon-and-rules" => Ok(Strategy::LexiconAndRules),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

enum LexiconOutcome<'a> {
    Lemma(&'a str),
    Categories(&'a [Category]),
    Miss,
}

/// Immutable once built. Shared by reference (or `Arc`) across threads
/// without locking.
#[derive(Debug)]
pub struct LemmatizationResolver {
    lexicon: LexiconStore,
    hierarchy: TagHierarchy,
    classifier: TagSetClassifier,
    rules: RuleEngine,
    morphology: Box<dyn MorphologicalAnalyzer>,
    introspector: Box<dyn TagIntrospector>,
    tokenizer: Box<dyn TextTokenizer>,
}

impl LemmatizationResolver {
    /// Creates a resolver with the default tag introspector and word
    /// splitter. The rule engine is used as given; see
    /// [`LemmatizationResolver::from_resources`] for the variant that
    /// validates rule output against the lexicon.
    pub fn new(
        lexicon: LexiconStore,
        hierarchy: TagHierarchy,
        rules: RuleEngine,
        morphology: Box<dyn MorphologicalAnalyzer>,
    ) -> Self {
        let classifier = TagSetClassifier::new(&lexicon, &hierarchy);

        Self {
            lexicon,
            hierarchy,
            classifier,
            rules,
            morphology,
            introspector: Box::new(BarTagIntrospector::new()),
            tokenizer: Box::new(Contraction::new()),
        }
    }

    /// Builds a resolver whose rule dictionary is the lexicon's lemma set.
    pub fn from_resources(resources: Resources) -> Self {
        let Resources {
            lexicon,
            hierarchy,
            rules,
            word_classes,
        } = resources;

        let rules = rules.with_dictionary(lexicon.lemma_set());
        let morphology = EnglishMorphology::new(word_classes);

        Self::new(lexicon, hierarchy, rules, Box::new(morphology))
    }

    /// Resolver over the tables compiled into the crate.
    pub fn embedded() -> Result<Self, Error> {
        Ok(Self::from_resources(Resources::embedded()?))
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn TextTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_introspector(mut self, introspector: Box<dyn TagIntrospector>) -> Self {
        self.introspector = introspector;
        self
    }

    #[inline]
    pub fn classify(&self, tag: &str) -> TagSet {
        self.classifier.classify(tag)
    }

    /// Lemmas of `spelling` using the lexicon and the rules.
    pub fn lemmatize(&self, spelling: &str, pos: Option<&str>) -> LemmataEntry {
        self.resolve(Strategy::LexiconAndRules, spelling, pos.unwrap_or_default())
    }

    pub fn resolve(&self, strategy: Strategy, spelling: &str, tag: &str) -> LemmataEntry {
        self.resolve_at(strategy, spelling, tag, 0)
    }

    pub fn resolve_by_lexicon(&self, spelling: &str, tag: &str) -> LemmataEntry {
        self.resolve(Strategy::Lexicon, spelling, tag)
    }

    pub fn resolve_by_rules(&self, spelling: &str, tag: &str) -> LemmataEntry {
        self.resolve(Strategy::Rules, spelling, tag)
    }

    pub fn resolve_by_lexicon_and_rules(&self, spelling: &str, tag: &str) -> LemmataEntry {
        self.resolve(Strategy::LexiconAndRules, spelling, tag)
    }

    fn resolve_at(
        &self,
        strategy: Strategy,
        spelling: &str,
        tag: &str,
        depth: usize,
    ) -> LemmataEntry {
        let tag_set = self.classifier.classify(tag);
        let key = if tag.is_empty() { NO_TAG } else { tag };
        let mut entry = LemmataEntry::new();

        if strategy.uses_lexicon() {
            match self.search_lexicon(spelling, tag, tag_set) {
                LexiconOutcome::Lemma(lemma) => {
                    entry.insert(key, Some(lemma.to_string()), tag_set);
                    return entry;
                }
                LexiconOutcome::Categories(categories) => {
                    categories.iter().for_each(|category| {
                        entry.insert(
                            category.tag.as_str(),
                            Some(category.lemma.clone()),
                            self.classifier.classify(&category.tag),
                        );
                    });
                    return entry;
                }
                LexiconOutcome::Miss => {}
            }
        }

        let lemma = strategy
            .uses_rules()
            .then(|| self.apply_rules_at(spelling, tag, depth));

        entry.insert(key, lemma, tag_set);
        entry
    }

    fn search_lexicon(&self, spelling: &str, tag: &str, tag_set: TagSet) -> LexiconOutcome<'_> {
        let lemma = match tag_set {
            TagSet::Penn => self
                .stage("penn", spelling, vec![tag])
                .or_else(|| {
                    let siblings = self.hierarchy.sibling_penn(tag);
                    self.stage("sibling penn", spelling, siblings)
                })
                .or_else(|| self.stage("nupos", spelling, self.hierarchy.nupos_for(tag)))
                .or_else(|| {
                    let siblings = self.hierarchy.sibling_nupos(tag);
                    self.stage("sibling nupos", spelling, siblings)
                }),
            TagSet::Nupos => self.stage("nupos", spelling, vec![tag]).or_else(|| {
                let penn = self.hierarchy.penn_for(tag).first().copied().unwrap_or(tag);
                self.stage("sibling nupos", spelling, self.hierarchy.sibling_nupos(penn))
            }),
            TagSet::None => {
                let categories = self.lexicon.lemmas_and_categories(spelling);
                if categories.is_empty() {
                    return LexiconOutcome::Miss;
                }

                log::debug!(
                    "{spelling:?}: {} untagged lexicon candidates",
                    categories.len()
                );
                return LexiconOutcome::Categories(categories);
            }
        };

        lemma.map_or(LexiconOutcome::Miss, LexiconOutcome::Lemma)
    }

    /// Looks `spelling` up under each of `tags` in order.
    fn stage(&self, name: &str, spelling: &str, tags: Vec<&str>) -> Option<&str> {
        let lemma = tags
            .into_iter()
            .find_map(|tag| self.lexicon.lemma(spelling, tag));

        if let Some(lemma) = lemma {
            log::debug!("{spelling:?}: {name} stage found {lemma:?}");
        }
        lemma
    }

    /// The rule fallback on its own, without consulting the lexicon for
    /// `spelling` itself.
    pub fn apply_rules(&self, spelling: &str, tag: &str) -> String {
        self.apply_rules_at(spelling, tag, 0)
    }

    fn apply_rules_at(&self, spelling: &str, tag: &str, depth: usize) -> String {
        let class = self.morphology.lemma_word_class(tag);

        if self.morphology.cant_lemmatize(spelling) || class == NONE_CLASS {
            return spelling.to_string();
        }

        if let Some(lemma) = self.rules.apply(spelling, COMPOUND_CLASS) {
            if lemma != spelling {
                return lemma;
            }
        }

        if depth < MAX_COMPOUND_DEPTH && self.introspector.is_compound_tag(tag) {
            if let Some(lemma) = self.resolve_compound(spelling, tag, depth) {
                return lemma;
            }
        }

        self.rules.lemmatize(spelling, &class)
    }

    /// Resolves each word part under its component tag and joins the
    /// results. `None` when the spelling does not split, or splits into a
    /// different number of parts than the tag.
    fn resolve_compound(&self, spelling: &str, tag: &str, depth: usize) -> Option<String> {
        let words = self.tokenizer.tokenize(spelling);
        if words.count() <= 1 {
            return None;
        }

        let tags = self.introspector.split_tag(tag);
        if tags.len() != words.count() {
            log::debug!(
                "{spelling:?}: {} word parts but {} tags in {tag:?}, not splitting",
                words.count(),
                tags.len()
            );
            return None;
        }

        let lemmas = words
            .iter()
            .zip(tags.iter())
            .map(|(word, tag)| {
                self.resolve_at(Strategy::LexiconAndRules, word, tag, depth + 1)
                    .lemmas_to_string()
            })
            .collect::<Vec<_>>();

        Some(lemmas.join(LEMMA_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::{LemmatizationResolver, Strategy, MAX_COMPOUND_DEPTH};
    use crate::{
        hierarchy::TagHierarchy,
        lexicon::LexiconStore,
        morphology::{EnglishMorphology, TagIntrospector},
        rules::{Rule, RuleEngine},
        tag::TagSet,
        token::{Token, Tokens},
        tokenizer::TextTokenizer,
    };

    #[derive(Debug)]
    struct AlwaysCompound;

    impl TagIntrospector for AlwaysCompound {
        fn is_compound_tag(&self, _tag: &str) -> bool {
            true
        }

        fn split_tag(&self, tag: &str) -> Vec<String> {
            vec![tag.to_string(), tag.to_string()]
        }
    }

    #[derive(Debug)]
    struct Twice;

    impl TextTokenizer for Twice {
        fn tokenize(&self, text: &str) -> Tokens {
            [text, text].into_iter().map(Token::from).collect()
        }
    }

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(ToString::to_string).collect()
    }

    fn resolver() -> LemmatizationResolver {
        let lexicon = [
            ("geese", "NNS", "goose"),
            ("was", "vbd", "be"),
            ("do", "vdb", "do"),
            ("n't", "xx", "not"),
            ("it", "pns31", "it"),
            ("'s", "vbz", "be"),
            ("box", "n1", "box"),
            ("leaf", "n1", "leaf"),
        ]
        .into_iter()
        .collect::<LexiconStore>();

        let hierarchy = TagHierarchy::new(
            vec![
                ("NN".into(), strings(&["n1"])),
                ("NNS".into(), strings(&["n2"])),
                ("VB".into(), strings(&["vvi", "vbi"])),
                ("VBD".into(), strings(&["vvd", "vbd"])),
                ("VBZ".into(), strings(&["vvz", "vbz"])),
                ("VBP".into(), strings(&["vvb", "vdb"])),
                ("RB".into(), strings(&["av", "xx"])),
                ("PRP".into(), strings(&["pns31"])),
            ],
            vec![
                ("noun".into(), strings(&["NN", "NNS"])),
                ("verb".into(), strings(&["VB", "VBD", "VBZ", "VBP"])),
            ],
        )
        .unwrap();

        let mut rules = RuleEngine::new();
        rules
            .insert("noun", Rule::suffix("es", ""))
            .insert("noun", Rule::suffix("ves", "f"))
            .insert("noun", Rule::suffix("s", ""))
            .insert("compound", Rule::irregular("cannot", "can||not"));
        let rules = rules.with_dictionary(lexicon.lemma_set());

        let mut classes = HashMap::new();
        classes.insert("NN".to_string(), "noun".to_string());
        classes.insert("NNS".to_string(), "noun".to_string());
        classes.insert("NNP".to_string(), "none".to_string());

        LemmatizationResolver::new(
            lexicon,
            hierarchy,
            rules,
            Box::new(EnglishMorphology::new(classes)),
        )
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("lexicon".parse::<Strategy>().unwrap(), Strategy::Lexicon);
        assert_eq!(
            "lexicon-and-rules".parse::<Strategy>().unwrap(),
            Strategy::LexiconAndRules
        );
        assert!("both".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Rules.to_string(), "rules");
    }

    #[test]
    fn test_resolve_sibling_penn() {
        let resolver = resolver();
        let entry = resolver.resolve_by_lexicon("geese", "NN");

        assert_eq!(entry.lemma(), Some("goose"));
        assert_eq!(entry.get("NN").map(|e| e.tag_set), Some(TagSet::Penn));
    }

    #[test]
    fn test_resolve_sibling_nupos() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_by_lexicon("was", "VBZ").lemma(), Some("be"));
    }

    #[test]
    fn test_resolve_nupos_tag_via_penn_siblings() {
        let resolver = resolver();
        let entry = resolver.resolve_by_lexicon("was", "vbz");

        assert_eq!(entry.lemma(), Some("be"));
        assert_eq!(entry.get("vbz").map(|e| e.tag_set), Some(TagSet::Nupos));
    }

    #[test]
    fn test_resolve_lexicon_miss_is_sentinel() {
        let resolver = resolver();
        let entry = resolver.resolve_by_lexicon("wolves", "NNS");

        assert!(!entry.is_found());
        assert_eq!(entry.lemmas_to_string(), "*");
    }

    #[test]
    fn test_resolve_rules_fallback() {
        let resolver = resolver();
        let lemma = |spelling| {
            resolver
                .resolve_by_lexicon_and_rules(spelling, "NNS")
                .lemmas_to_string()
        };

        assert_eq!(lemma("leaves"), "leaf");
        assert_eq!(lemma("boxes"), "box");
        // No candidate for "wolves" is a known lemma.
        assert_eq!(lemma("wolves"), "wolves");
    }

    #[test]
    fn test_resolve_rules_only_skips_lexicon() {
        let resolver = resolver();
        // The lexicon knows "geese" but the rules do not.
        let entry = resolver.resolve_by_rules("geese", "NNS");
        assert_eq!(entry.lemmas_to_string(), "geese");
    }

    #[test]
    fn test_resolve_none_class_unchanged() {
        let resolver = resolver();
        assert_eq!(resolver.apply_rules("Boxes", "NNP"), "Boxes");
    }

    #[test]
    fn test_resolve_compound_exception() {
        let resolver = resolver();
        let entry = resolver.lemmatize("cannot", Some("vmb|xx"));
        assert_eq!(entry.lemmas_to_string(), "can||not");
    }

    #[test]
    fn test_resolve_compound_tag() {
        let resolver = resolver();

        let entry = resolver.lemmatize("don't", Some("vdb|xx"));
        assert_eq!(entry.lemmas_to_string(), "do||not");
        assert_eq!(entry.get("vdb|xx").map(|e| e.tag_set), Some(TagSet::None));

        let penn = resolver.lemmatize("it's", Some("PRP|VBZ"));
        assert_eq!(penn.lemmas_to_string(), "it||be");
    }

    #[test]
    fn test_resolve_compound_count_mismatch_falls_back() {
        let resolver = resolver();
        let entry = resolver.lemmatize("don't", Some("vdb|xx|pns31"));
        assert_eq!(entry.lemmas_to_string(), "don't");
    }

    #[test]
    fn test_resolve_tag_free() {
        let resolver = resolver();

        let entry = resolver.lemmatize("Was", None);
        assert_eq!(entry.lemmas_to_string(), "be");
        assert_eq!(entry.get("vbd").map(|e| e.tag_set), Some(TagSet::Nupos));

        let unknown = resolver.lemmatize("boxes", None);
        assert_eq!(
            unknown.get("NONE").and_then(|e| e.lemma.as_deref()),
            Some("boxes")
        );
    }

    #[test]
    fn test_resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LemmatizationResolver>();
    }

    #[test]
    fn test_resolve_compound_depth_limit() {
        let resolver = resolver()
            .with_introspector(Box::new(AlwaysCompound))
            .with_tokenizer(Box::new(Twice));

        let lemmas = resolver.lemmatize("zork", Some("qq")).lemmas_to_string();
        let parts = lemmas.split("||").collect::<Vec<_>>();

        assert_eq!(parts.len(), 1 << MAX_COMPOUND_DEPTH);
        assert!(parts.iter().all(|part| *part == "zork"));
    }
}
