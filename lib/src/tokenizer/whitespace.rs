use crate::{
    token::{Token, Tokens},
    tokenizer::TextTokenizer,
};

#[derive(Clone, Debug, Default)]
pub struct Whitespace;

impl Whitespace {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextTokenizer for Whitespace {
    fn tokenize(&self, text: &str) -> Tokens {
        text.split_whitespace().map(Token::from).collect()
    }
}
