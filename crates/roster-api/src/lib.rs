//! JSON/CSV HTTP API for Roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::ConstituentStore`]. Transport concerns (binding,
//! TLS, request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(AppState::new(store, UlidGenerator::new()));
//! ```

pub mod constituents;
pub mod error;
pub mod extract;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::{id::IdGenerator, store::ConstituentStore};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Long-lived handles shared by every request.
pub struct AppState<S> {
  pub store: Arc<S>,
  pub ids:   Arc<dyn IdGenerator>,
}

impl<S> AppState<S> {
  pub fn new(store: S, ids: impl IdGenerator + 'static) -> Self {
    Self { store: Arc::new(store), ids: Arc::new(ids) }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), ids: Arc::clone(&self.ids) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ConstituentStore + 'static,
{
  Router::new()
    .route(
      "/constituents",
      get(constituents::list::<S>).post(constituents::create::<S>),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
