//! RouterOS export parsing.
//!
//! The pipeline is staged the same way the export format is layered:
//!
//! - [`normalize`] turns raw text into logical lines (comments stripped,
//!   backslash continuations joined).
//! - [`splitter`] resolves hierarchical section paths against the known
//!   vocabulary and groups commands per section.
//! - [`tokenize`] splits one command into an action verb and quote-aware
//!   `key=value` parameters.
//! - [`extract`] holds the shared typed coercions (booleans, integers,
//!   durations, IP networks, lists) every handler follows.
//! - [`registry`] maps a resolved section path to a [`registry::SectionHandler`];
//!   [`handlers`] contains the typed per-section implementations.
//! - [`parser`] drives the whole pass and collects per-section errors.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod splitter;
pub mod tokenize;

pub use error::{HandlerError, HandlerResult};
pub use model::{Action, Command, Configuration, ParseError, Section, Summary, Value};
pub use parser::{discover_sections, Parser};
pub use registry::{HandlerRegistry, SectionHandler};
