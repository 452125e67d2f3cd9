//! Identifier generation.
//!
//! Handlers never mint ids themselves; they ask an injected [`IdGenerator`],
//! so tests can substitute a deterministic sequence.

use std::sync::{Mutex, PoisonError};

use ulid::{Generator, Ulid};

/// Produces globally unique, lexicographically sortable identifiers.
pub trait IdGenerator: Send + Sync {
  fn generate_id(&self) -> String;
}

impl<F> IdGenerator for F
where
  F: Fn() -> String + Send + Sync,
{
  fn generate_id(&self) -> String { self() }
}

/// Monotonic ULIDs: ids minted within the same millisecond still sort in
/// creation order.
pub struct UlidGenerator {
  inner: Mutex<Generator>,
}

impl UlidGenerator {
  pub fn new() -> Self { Self { inner: Mutex::new(Generator::new()) } }
}

impl Default for UlidGenerator {
  fn default() -> Self { Self::new() }
}

impl IdGenerator for UlidGenerator {
  fn generate_id(&self) -> String {
    let mut generator = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
    // Overflow of the random component within one millisecond is
    // astronomically unlikely; fall back to a fresh non-monotonic id.
    generator.generate().unwrap_or_else(|_| Ulid::new()).to_string()
  }
}
