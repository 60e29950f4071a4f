#![forbid(unsafe_code)]

pub mod questions;
pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryRepository, KeyValueStore, QuestionSource, Storage, StorageError};
