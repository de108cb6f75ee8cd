//! Shared test utilities for git-fleet
//!
//! Integration tests build real repositories in temporary directories and
//! point the binary at them through a generated configuration file.

pub mod assertions;
pub mod fixtures;
pub mod repository;
pub mod runner;
