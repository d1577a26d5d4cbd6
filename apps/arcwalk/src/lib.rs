//! # arcwalk
//!
//! Command-line driver for the arcwalk graph-algorithm framework.
//!
//! The commands live in a library so integration tests can run them
//! without spawning the binary.

pub mod cli;
