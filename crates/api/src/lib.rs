//! Allergen Menu API library.
//!
//! This crate provides the REST API as a library, allowing the router to be
//! tested without a network listener and the store to be reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
