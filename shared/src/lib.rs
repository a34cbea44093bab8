pub mod adapters;
pub mod core;
pub mod error;
pub mod message_card;
mod money;
mod timestamp;

pub use reqwest::Client;
