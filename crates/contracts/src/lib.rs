//! Shared contracts for the site generator web client and API server.
//!
//! The [`domain`] module holds the wire types and their validators, including
//! the error envelope every endpoint returns on failure. [`inbound::http`]
//! adapts those types to Actix, [`doc`] describes them as OpenAPI components,
//! and [`config`] and [`telemetry`] carry the settings and logging bootstrap
//! binaries share.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod telemetry;

/// Public OpenAPI surface used by client generators.
pub use doc::ContractsDoc;
