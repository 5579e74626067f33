//! langpack - gettext catalogs for modular platforms and their extensions
//!
//! langpack is a CLI tool and library that extracts translatable strings from
//! Python sources, TypeScript UI code and JSON settings schemas into one
//! template per project, keeps per-locale catalogs in sync with it, compiles
//! them to `.mo` and JSON, and assembles per-locale language packs.
//!
//! ## Module Structure
//!
//! - `api`: Top-level package and language-pack operations
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, extraction, catalogs, synchronization, compilation and packaging
//! - `error`: Error kinds callers may want to distinguish

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
