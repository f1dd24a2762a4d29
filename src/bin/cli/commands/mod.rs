pub mod backup;
pub mod delete;
pub mod due;
pub mod export;
pub mod history;
pub mod import;
pub mod list;
pub mod new;
pub mod reset;
pub mod review;
pub mod show;
pub mod stats;
