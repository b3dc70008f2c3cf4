//! tokenkit - A grammar-driven tokenizing engine
//!
//! Text is split into typed tokens by grammars made of modes, each mode an ordered
//! list of pattern or function rules. Token types form a global hierarchy
//! (`Code.Number.Hexadecimal` is a `Code.Number`, which is a `Code`), scans end on
//! a `Stop` token, and each scan keeps a score used to pick the grammar that best
//! fits a text.
//!
//! - [`token_type`] - the token type hierarchy
//! - [`token`] - typed slices of the input
//! - [`cursor`] - scanners for common token shapes
//! - [`grammar`] - grammars, modes, rules and actions
//! - [`engine`] - the tokenizing engine
//! - [`registry`] - grammar lookup and auto-detection
//! - [`grammars`] - built-in grammars
//! - [`config`] and [`output`] - settings and report rendering for the CLI

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod cursor;
pub mod engine;
pub mod grammar;
pub mod grammars;
pub mod output;
pub mod registry;
pub mod token;
pub mod token_type;
