use crate::{
    token::{Token, Tokens},
    tokenizer::TextTokenizer,
};

/// Enclitics split off the end of a contraction, longest first.
const CLITICS: [&str; 7] = ["n't", "'re", "'ve", "'ll", "'s", "'d", "'m"];

/// Splits a contracted spelling into its word parts.
///
/// `don't` becomes `do` + `n't`, `we're` becomes `we` + `'re`. Clitics are
/// peeled repeatedly, so `shouldn't've` yields three parts. A spelling with
/// nothing to split comes back as a single token.
#[derive(Clone, Debug, Default)]
pub struct Contraction;

impl Contraction {
    pub fn new() -> Self {
        Self::default()
    }

    fn split_clitic(word: &str) -> Option<(&str, &str)> {
        CLITICS.iter().find_map(|clitic| {
            if word.len() <= clitic.len() {
                return None;
            }

            let at = word.len() - clitic.len();
            let matches = word.is_char_boundary(at) && word[at..].eq_ignore_ascii_case(clitic);

            matches.then(|| word.split_at(at))
        })
    }
}

impl TextTokenizer for Contraction {
    fn tokenize(&self, text: &str) -> Tokens {
        let spelling = text.replace('\u{2019}', "'");

        let mut parts = Vec::new();
        let mut rest = spelling.as_str();

        while let Some((head, clitic)) = Self::split_clitic(rest) {
            parts.push(clitic);
            rest = head;
        }

        if !rest.is_empty() {
            parts.push(rest);
        }

        parts.into_iter().rev().map(Token::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        tokenizer::{Contraction, TextTokenizer},
        tokens,
    };

    #[test]
    fn test_contraction_negation() {
        let tokenizer = Contraction::new();
        assert_eq!(tokenizer.tokenize("don't"), tokens!["do", "n't"]);
        assert_eq!(tokenizer.tokenize("can't"), tokens!["ca", "n't"]);
        assert_eq!(tokenizer.tokenize("WON'T"), tokens!["WO", "N'T"]);
    }

    #[test]
    fn test_contraction_clitics() {
        let tokenizer = Contraction::new();
        assert_eq!(tokenizer.tokenize("we're"), tokens!["we", "'re"]);
        assert_eq!(tokenizer.tokenize("it's"), tokens!["it", "'s"]);
        assert_eq!(tokenizer.tokenize("I'm"), tokens!["I", "'m"]);
    }

    #[test]
    fn test_contraction_stacked() {
        let tokenizer = Contraction::new();
        assert_eq!(
            tokenizer.tokenize("shouldn't've"),
            tokens!["should", "n't", "'ve"]
        );
    }

    #[test]
    fn test_contraction_typographic_apostrophe() {
        let tokenizer = Contraction::new();
        assert_eq!(tokenizer.tokenize("don\u{2019}t"), tokens!["do", "n't"]);
    }

    #[test]
    fn test_contraction_plain_word() {
        let tokenizer = Contraction::new();
        assert_eq!(tokenizer.tokenize("isotope"), tokens!["isotope"]);
        assert_eq!(tokenizer.tokenize("'s"), tokens!["'s"]);
        assert!(tokenizer.tokenize("").is_empty());
    }
}
