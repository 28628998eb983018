//! Account records with salted password hashes, and the storage port behind them.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod usecase;

#[cfg(test)]
pub(crate) mod testing;
