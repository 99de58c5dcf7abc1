//! Lemma resolution over two POS tag sets (PennPOS and NUPOS), a lexicon and
//! a rule-based morphological fallback.

pub mod entry;
pub mod error;
pub mod hierarchy;
pub mod lexicon;
pub mod loader;
pub mod morphology;
pub mod resolver;
pub mod rules;
pub mod tag;
pub mod token;
pub mod tokenizer;

pub use entry::{LemmataEntry, LEMMA_SEPARATOR};
pub use error::{Error, LoadError};
pub use loader::{ResourcePaths, Resources};
pub use resolver::{LemmatizationResolver, Strategy};
pub use tag::TagSet;
