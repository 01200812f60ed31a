pub mod add;
pub mod config;
pub mod events;
pub mod get;
pub mod list;
pub mod remove;
pub mod sync;
