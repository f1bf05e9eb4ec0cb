//! Combat domain: decision processes for enemies.

pub(crate) mod markov;

pub use markov::{MarkovChain, MarkovChainError};
