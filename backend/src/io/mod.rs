//! # IO Module
//!
//! Interface layer between the web UI and the domain services.
//!
//! Handlers translate JSON form submissions into domain commands, call the
//! matching service, and turn the outcome into an HTTP response: the
//! created record with its success message, or an `ErrorResponse` whose
//! status tells validation failures (400), unknown ids (404) and storage
//! failures (500) apart.

pub mod rest;

pub use rest::*;
