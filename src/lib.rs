//! Client SDK for the Dashactyl panel API.
//!
//! This crate mirrors the users, servers, coupons and store items of a
//! Dashactyl panel in local caches, and ships the `dashctl` command-line
//! client built on top of it.
//!
//! # Modules
//!
//! - `cache`: insertion-ordered entity caches
//! - `client`: the [`Dashactyl`] facade
//! - `managers`: client-level managers, one per entity kind
//! - `model`: entity models built from API payloads
//! - `user_managers`: coins, resource limits and servers of a single user
//! - `transport`, `http_utils`: the transport seam and its reqwest implementation
//! - `configuration`, `format`, `commands`, `actions`, `exit_codes`: the CLI layer

pub mod actions;
pub mod cache;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod http_utils;
pub mod managers;
pub mod model;
pub mod transport;
pub mod user_managers;

#[cfg(test)]
mod test_support;

pub use client::{ClientConfig, Dashactyl};
pub use error::{DashactylError, TransportError};
pub use model::resources::{MAX_AMOUNT, MAX_SERVERS};
