//! rsh library
//!
//! Exposes the shell components for the binary and for tests.

pub mod commands;
pub mod exit_code;
pub mod output;
pub mod shell;

#[cfg(test)]
mod test_utils;
