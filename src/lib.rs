#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod advice;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod health;
pub mod messages;
pub mod persona;
pub mod providers;

pub use client::CompletionClient;
pub use config::Config;
pub use error::CompletionError;
