//! Roster API client library
//!
//! A Rust async client SDK for the Roster user-profile service: identity
//! authentication, profile CRUD, reference-data lookups, and declarative
//! form validation.

pub mod auth;
pub mod error;
pub mod form;
pub mod model;
pub mod validate;

mod api;
mod client;

pub use client::*;
