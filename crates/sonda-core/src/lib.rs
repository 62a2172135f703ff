//! Async client layer for the sonda dashboard backend.
//!
//! This crate is the plumbing between the REST backend and any view layer
//! (CLI, TUI, tests):
//!
//! - [`client::ApiClient`]: typed, resource-oriented HTTP client. Attaches
//!   the current bearer credential to every request and maps error payloads
//!   into the [`error::Error`] taxonomy.
//! - [`session::SessionStore`]: the one piece of process-wide mutable
//!   state: the authenticated session, persisted across runs and observable
//!   through a watch channel.
//! - [`poller::spawn`]: a view's periodic refresh cycle as an explicit
//!   cancellable task with all-or-nothing state application.
//! - [`snapshot`]: the fixed per-view fetch sets, each issuing its
//!   requests concurrently so one cycle's resources are mutually consistent.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sonda_core::{ApiClient, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::in_memory());
//! let client = ApiClient::new("http://localhost:5000/api", Arc::clone(&session))?;
//!
//! let login = client.login("ana", "secreta").await?;
//! session.login(sonda_core::Session::new(login.token, login.user))?;
//!
//! let readings = client.list_readings(10).await?;
//! println!("latest: {:?}", readings.first());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod poller;
pub mod session;
pub mod snapshot;

pub use client::{ApiClient, HealthResponse, LoginResponse};
pub use error::{Error, Result};
pub use poller::{PollHandle, PollerConfig};
pub use session::{Session, SessionStore};
