#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Presentation logic for the crime data explorer.
//!
//! Works only on already-resolved data: the intro selector decides which
//! of four intro variants a page shows, and the trend narrator turns a
//! year's series points into a comparison sentence plus table rows.

pub mod intro;
pub mod series;
pub mod trend;
