//! # rsc
//!
//! A parser for RouterOS export scripts.
//!
//! RouterOS devices export their configuration as a line-oriented script of
//! hierarchical section headers (`/ip firewall filter`) followed by
//! `add`/`set` commands. This crate normalizes that text into a typed,
//! read-only [`Configuration`](rsc::model::Configuration): logical lines are
//! rebuilt from backslash continuations, section paths are resolved against
//! a fixed vocabulary with longest-match-first lookahead, and each section's
//! commands are tokenized and typed by a registered handler. A malformed
//! section never aborts the parse; it is recorded as a
//! [`ParseError`](rsc::model::ParseError) and the rest of the document is
//! kept.
//!
//! Parsing is a single synchronous pass:
//!
//! ```text
//! let parser = Parser::with_defaults();
//! let config = parser.parse(text, Some("router-01"));
//! for (path, section) in &config.sections {
//!     println!("{path}: {} commands", section.commands.len());
//! }
//! ```

pub mod rsc;
