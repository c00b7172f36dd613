//! Core components for signing cloud API requests.
//!
//! This crate provides the foundational types shared by the cloudsign
//! service crates. Nothing in here performs network I/O: every helper is a
//! pure transformation over its inputs, so it's safe to call from any
//! thread or task without coordination.
//!
//! ## Overview
//!
//! - [`Error`] and [`ErrorKind`]: the error taxonomy used across the workspace
//! - [`Env`]: abstract access to environment variables, with [`OsEnv`] and [`StaticEnv`]
//!
//! ## Example
//!
//! ```
//! use cloudsign_core::hash::hex_sha256;
//! use cloudsign_core::time::{format_date, parse_rfc3339};
//!
//! let t = parse_rfc3339("2022-03-13T07:20:04Z").unwrap();
//! assert_eq!(format_date(t), "20220313");
//! assert_eq!(
//!     hex_sha256(b""),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: SHA-256 and HMAC-SHA-256 helpers
//! - [`time`]: clock reading and SigV4 timestamp formats
//! - [`utils`]: general utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};
