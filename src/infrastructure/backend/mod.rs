//! Hosted backend adapter: authentication and row store over REST.

mod auth;
mod client;
mod dto;
mod rows;

pub use client::BackendClient;
