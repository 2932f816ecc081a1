//! Helpers shared between puzzle solutions

pub mod grid;
