mod contraction;
mod whitespace;

use std::fmt::Debug;

pub use {contraction::Contraction, whitespace::Whitespace};

use crate::token::Tokens;

pub trait TextTokenizer: Debug + Send + Sync {
    fn tokenize(&self, text: &str) -> Tokens;
}
