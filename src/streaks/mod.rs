//! Review streak tracking module

pub mod models;
pub mod storage;

pub use models::StreakTracker;
pub use storage::StreakStorage;
