//! Per word class rules, tried in insertion order.

use std::str::FromStr;

use hashbrown::{HashMap, HashSet};

use crate::morphology::DEFAULT_CLASS;

/// Shortest stem a suffix rule may leave behind.
pub const DEFAULT_MIN_STEM: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleKind {
    Irregular,
    Suffix,
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "irregular" => Ok(RuleKind::Irregular),
            "suffix" => Ok(RuleKind::Suffix),
            other => Err(format!("unknown rule kind {other:?}")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    kind: RuleKind,
    pattern: String,
    replacement: String,
    min_stem: usize,
}

impl Rule {
    pub fn irregular(word: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Irregular,
            pattern: word.into().to_lowercase(),
            replacement: lemma.into(),
            min_stem: 0,
        }
    }

    pub fn suffix(suffix: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Suffix,
            pattern: suffix.into().to_lowercase(),
            replacement: replacement.into(),
            min_stem: DEFAULT_MIN_STEM,
        }
    }

    pub fn with_min_stem(mut self, min_stem: usize) -> Self {
        self.min_stem = min_stem;
        self
    }

    /// Candidate lemma for an already lower-cased word, if the rule matches
    /// structurally.
    fn candidate(&self, word: &str) -> Option<String> {
        match self.kind {
            RuleKind::Irregular => (word == self.pattern).then(|| self.replacement.clone()),
            RuleKind::Suffix => {
                let stem = word.strip_suffix(self.pattern.as_str())?;
                if stem.chars().count() < self.min_stem {
                    return None;
                }

                let lemma = format!("{stem}{}", self.replacement);
                (!lemma.is_empty()).then_some(lemma)
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RuleEngine {
    classes: HashMap<String, Vec<Rule>>,
    dictionary: Option<HashSet<String>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rule` to the rules of `class`.
    pub fn insert(&mut self, class: impl Into<String>, rule: Rule) -> &mut Self {
        self.classes.entry(class.into()).or_default().push(rule);
        self
    }

    /// Sets the dictionary suffix rule output is checked against. Entries
    /// are compared lower-cased.
    pub fn with_dictionary(mut self, dictionary: HashSet<String>) -> Self {
        self.dictionary = Some(
            dictionary
                .into_iter()
                .map(|lemma| lemma.to_lowercase())
                .collect(),
        );
        self
    }

    #[inline]
    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    /// Number of rules across every class.
    pub fn len(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn accepts(&self, lemma: &str) -> bool {
        match &self.dictionary {
            Some(dictionary) => dictionary.contains(&lemma.to_lowercase()),
            None => true,
        }
    }

    /// First accepted rule output of `class` for `spelling`. An empty class
    /// selects the default rules.
    pub fn apply(&self, spelling: &str, class: &str) -> Option<String> {
        let class = if class.is_empty() { DEFAULT_CLASS } else { class };
        let rules = self.classes.get(class)?;
        let word = spelling.to_lowercase();

        rules.iter().find_map(|rule| {
            let lemma = rule.candidate(&word)?;
            match rule.kind {
                RuleKind::Irregular => Some(lemma),
                RuleKind::Suffix => self.accepts(&lemma).then_some(lemma),
            }
        })
    }

    /// Like [`RuleEngine::apply`], returning `spelling` unchanged when no
    /// rule is accepted.
    pub fn lemmatize(&self, spelling: &str, class: &str) -> String {
        self.apply(spelling, class)
            .unwrap_or_else(|| spelling.to_string())
    }
}
