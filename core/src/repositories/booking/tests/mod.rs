//! Tests for the in-memory booking repository

#[cfg(test)]
mod memory_tests;
