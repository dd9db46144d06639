pub mod wordlist;

pub use wordlist::{NewWord, Word, Wordlist, WordlistSummary};
