#![doc = "leanix-publish-core: core logic library for leanix-publish."]

//! This crate contains the domain types, error taxonomy, GraphQL payloads and the
//! publish pipeline for leanix-publish. Transport (HTTP) lives in the CLI crate,
//! which implements [`contract::FactSheetApi`].
//!
//! # Usage
//! Depend on this crate for the pipeline and implement the contract trait for a
//! concrete backend, or use the exported `MockFactSheetApi` in tests.

pub mod config;
pub mod contract;
pub mod error;
pub mod graphql;
pub mod publish;

pub use error::{ErrorKind, PublishError};
