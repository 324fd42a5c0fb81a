//! Integration tests for the tree store

mod cli_execution;
mod fixture_scenario;
