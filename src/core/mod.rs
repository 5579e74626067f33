//! Core engine: scanning, extraction, catalogs, synchronization, compilation
//! and language-pack assembly.
//!
//! Data flows leaf-first: `scanner` → `extract` → `catalog::merge` (one
//! template per project) → `sync` (one catalog per locale) → `compile` →
//! `pack`.

pub mod catalog;
pub mod compile;
pub mod context;
pub mod extract;
pub mod locale;
pub mod pack;
pub mod scanner;
pub mod sync;
pub mod tools;
pub mod version;

pub use context::TranslateContext;
