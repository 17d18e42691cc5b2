//! Bus route resolution server.
//!
//! Answers: "which bus gets me from here to there?" A direct catalog
//! match is tried first; otherwise a generative model proposes a
//! multi-leg connection, which is parsed into navigation steps and
//! reconciled against the catalog for display.

pub mod cache;
pub mod catalog;
pub mod gemini;
pub mod resolve;
pub mod web;
