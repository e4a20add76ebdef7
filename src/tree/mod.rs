pub mod classify;
pub mod collector;
pub mod entry;
pub mod listing;
pub mod loader;
pub mod path;
pub mod search;
