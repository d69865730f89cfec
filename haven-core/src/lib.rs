//! # Haven Core
//!
//! Core library for the Haven listing API, providing the domain types,
//! storage abstractions, and read pipeline behind the HTTP surface.
//!
//! ## Overview
//!
//! - **Domain types**: property, image, and owner records plus the wire-level
//!   [`PropertyView`](domain::PropertyView) composite
//! - **Storage ports**: trait-based repository interfaces so the service
//!   layer stays independent of the PostgreSQL backing
//! - **Filter queries**: translation of optional filter criteria into a
//!   single bound SQL predicate
//! - **Listing service**: the read/filter/compose pipeline that enriches
//!   each property with its first enabled image
#![allow(missing_docs)]

pub mod database;
pub mod domain;
pub mod error;
pub mod listings;

pub use error::{HavenError, Result};
