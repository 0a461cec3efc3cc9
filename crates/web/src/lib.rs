//! Allergen Menu web client library.
//!
//! Server-rendered pages over the menu API. Exposed as a library so the
//! router can be exercised in tests against an in-process API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api_client;
pub mod config;
pub mod error;
pub mod filters;
pub mod form;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;
