//! Arbor Core - Shared types for the Arbor B-tree index.
//!
//! This crate provides the pieces every other Arbor crate builds on:
//!
//! - `Key`: the default scalar key type
//! - `TreeConfig`: the order of a tree and the occupancy bounds it implies
//! - `Error`: error types for construction and invariant checking
//!
//! # Example
//!
//! ```rust
//! use arbor_core::{Error, TreeConfig, MIN_ORDER};
//!
//! let config = TreeConfig::new(5);
//! assert_eq!(config.max_keys(), 4);
//! assert_eq!(config.min_keys(), 2);
//! assert!(config.validate().is_ok());
//!
//! let err = TreeConfig::new(2).validate().unwrap_err();
//! assert_eq!(err, Error::invalid_order(2, MIN_ORDER));
//! ```

#![no_std]

extern crate alloc;

pub mod config;
mod error;
mod types;

pub use config::{TreeConfig, DEFAULT_ORDER, MIN_ORDER};
pub use error::{Error, Result};
pub use types::Key;
