//! Abana Client - adapter over the managed document store and auth service
//!
//! The storefront and admin console only ever talk to the backend through
//! [`DocumentStore`] and [`AuthService`]. Two implementations ship here:
//!
//! - [`FirebaseBackend`]: Firestore REST v1 plus Identity Toolkit sign-in
//! - [`MemoryBackend`]: in-process store for tests and offline runs

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod firebase;
pub mod memory;
pub mod session;

pub use backend::{AuthService, DocumentStore};
pub use config::ClientConfig;
pub use document::{Direction, Document, DocumentWrite, Fields, OrderBy, Query};
pub use error::{AuthError, ClientError, ClientResult};
pub use firebase::FirebaseBackend;
pub use memory::MemoryBackend;
pub use session::{Session, SessionHub};
