//! `gatepass-client`
//!
//! **Responsibility:** typed access to the remote gate pass REST API.
//!
//! This crate provides:
//! - [`ApiClient`], one method per endpoint, built from an injected [`ClientConfig`]
//! - [`GatePassApi`], the async seam the console pages are written against
//! - [`ApiError`], the single error type every call fails with
//!
//! The API is the authority on every status transition; this crate only
//! forwards requests and decodes responses.

pub mod api;
pub mod client;
pub mod config;
pub mod download;
pub mod error;

pub use api::GatePassApi;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use download::{Download, PrintScope, ScanImage, ScanKind};
pub use error::{ApiError, HttpValidationError, ValidationError};
pub use reqwest::Url;
