pub mod columns;
pub mod error;
pub mod journal;
pub mod matching;
pub mod strategy;

pub use error::{NafError, Result};
pub use journal::{ChangeKind, Journal, JournalEntry};
pub use matching::MatchVector;
pub use strategy::{StrategyKind, StrategyOverrides, StrategyParams};
