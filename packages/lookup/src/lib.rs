#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lookup tables and display helpers for the crime data explorer.
//!
//! Everything here is a total function over static tables: unknown input
//! falls back to a sensible display value instead of failing.
//!
//! - [`offenses`]: UI crime names to API offense identifiers.
//! - [`states`]: state abbreviations, names and ORI prefixes.
//! - [`usa`]: place slugs (national, regions, states) to display names.
//! - [`text`]: slugs and word casing.
//! - [`format`]: counts and rates for narrative text and tables.

pub mod format;
pub mod offenses;
pub mod states;
pub mod text;
pub mod usa;
