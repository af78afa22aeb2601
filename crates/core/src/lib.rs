//! # toxictl core
//!
//! Domain types, traits, and error definitions for the toxictl proxy
//! administration client. This crate has **no transport dependencies** — it
//! defines the model that the HTTP client and the command line build on.
//!
//! - [`fields`] turns `key=value,key=value` strings into integer fields
//! - [`toxic`] models toxic kinds and splits toxics by direction
//! - [`admin`] is the seam to the administration service

pub mod error;
pub mod fields;
pub mod toxic;
pub mod proxy;
pub mod admin;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use fields::{Fields, parse_fields};
pub use toxic::{NewToxic, Stream, Toxic, ToxicKind, Toxics, split_by_direction};
pub use proxy::{Proxies, Proxy};
pub use admin::AdminService;
