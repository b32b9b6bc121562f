//! Shared data structures for pacprune.

pub mod collections;

pub use collections::FxHashMap;
