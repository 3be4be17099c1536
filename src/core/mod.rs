//! Core domain logic for unitspec
//!
//! Evaluation logic with no knowledge of how facts are gathered.
//! All access to the machine under test goes through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Resource, Attribute, Matcher, Expectation, Report)
//! - `services/` - Evaluation and run orchestration
//! - `ports/` - Trait definitions for target access

pub mod models;
pub mod ports;
pub mod services;
