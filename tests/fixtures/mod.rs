//! Test fixtures for route-sequencer.
//!
//! Provides real Temuco (Chile) addresses with coordinates, a CSV export of
//! them in the spreadsheet's column layout, and an OSRM container helper.

#![allow(dead_code)]

pub mod osrm;
pub mod temuco_locations;

pub use temuco_locations::*;
