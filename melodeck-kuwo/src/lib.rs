pub mod client;
pub mod error;
pub mod provider;

#[cfg(test)]
mod fake;

pub use client::{KuwoClient, KuwoSong};
pub use error::{KuwoError, Result};
pub use provider::KuwoLyricsProvider;
