pub mod client;
pub mod commands;

pub use client::{Client, Params, RequestError, TrelloApi};
