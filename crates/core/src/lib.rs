//! Core library for docoutline
//!
//! This crate implements the **Functional Core** of the docoutline application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The docoutline project splits into three crates:
//!
//! - **`docoutline_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: Turns PDF bytes into a single string of extracted text
//! - **`docoutline`**: File discovery, output persistence and presentation (the Imperative Shell)
//!
//! Every function here takes text in and hands structured data back. Nothing
//! reads files, nothing writes to the terminal, and no state survives between
//! two calls, so documents can be processed concurrently without coordination.
//!
//! # Pipeline
//!
//! ```text
//! RawText ─┬─> page::paginate ────> classify::classify_lines ─┬─> outline::assemble
//!          └──────────────> fallback::segment_paragraphs ─────┘   (only when no headings)
//! ```
//!
//! # Module Organization
//!
//! - [`types`]: `HeadingLevel`, `HeadingCandidate`, `DocumentStructure`
//! - [`profile`]: Batch and interactive thresholds, TOML overrides
//! - [`page`]: Best-effort page counter driven by form feeds and bare page numbers
//! - [`classify`]: Ordered pattern rules that turn lines into heading candidates
//! - [`fallback`]: Paragraph-based pseudo-headings for documents without markup
//! - [`outline`]: Title derivation, capping, and the top-level entry point
//! - [`export`]: Helpers for the JSON export consumed by the presentation layer
//!
//! # Example Usage
//!
//! ```rust
//! use docoutline_core::outline::extract_document_structure;
//! use docoutline_core::profile::Profile;
//! use docoutline_core::types::HeadingLevel;
//!
//! let text = "Chapter 1 Overview\n\nSome body text.\n\n2. Background\n\nMore text.";
//! let structure = extract_document_structure("Annual-Report_2024.pdf", text, &Profile::batch());
//!
//! assert_eq!(structure.title, "Annual Report 2024");
//! assert_eq!(structure.outline.len(), 2);
//! assert_eq!(structure.outline[1].level, HeadingLevel::H1);
//! assert_eq!(structure.outline[1].text, "Background");
//! ```

pub mod classify;
pub mod export;
pub mod fallback;
pub mod outline;
pub mod page;
pub mod profile;
pub mod types;
