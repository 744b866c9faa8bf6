//! Strip emoji glyphs from Markdown documents.
//!
//! The library exposes the pieces the `mdstrip` binary is built from: the code-point table in
//! [`ranges`], the pure text transformation in [`stripper`], and the directory-level
//! [`processor::Processor`].

pub mod config;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod exit_codes;
pub mod output;
pub mod processor;
pub mod ranges;
pub mod report;
pub mod stripper;

pub use crate::error::StripError;
pub use crate::processor::{Processor, WriteMode};
pub use crate::ranges::{CodePointRange, EMOJI_RANGES, RangeSet};
pub use crate::stripper::{Stripped, strip};
