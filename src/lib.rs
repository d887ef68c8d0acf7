//! Placard renders a parsed social-card request into a complete,
//! self-contained HTML document for downstream image capture.
//!
//! The pipeline is deterministic string templating: fonts are embedded as
//! base64 data URIs, theme-dependent CSS values come from a fixed palette
//! table, the body text flows through markdown rendering or entity escaping
//! followed by emoji substitution, and everything is interpolated into a
//! fixed document skeleton.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
