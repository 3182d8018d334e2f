//! Client for the Lex & Safety case-records backend.
//!
//! [`ApiClient`] is the transport (JSON, multipart and file downloads with
//! the session token attached); [`LexApi`] wraps it with one typed method
//! per endpoint.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use api::{BASE_PROCESAL_DEFAULT, LexApi};
pub use client::{ApiClient, Auth, TOKEN_HEADER};
pub use config::{API_URL_ENV, ClientConfig, project_dirs};
pub use error::{ClientError, Result};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
