//! Core types and trait definitions for the Roster constituent service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the record schema, the validation layer that guards every request, the CSV
//! formatter, and the [`store::ConstituentStore`] abstraction the backends
//! implement.

pub mod constituent;
pub mod csv;
pub mod error;
pub mod filter;
pub mod id;
pub mod query;
pub mod store;
pub mod timestamp;
pub mod validate;

pub use error::{Error, Result};
