//! Tests for the booking lifecycle engine

#[cfg(test)]
mod service_tests;
#[cfg(test)]
mod query_tests;
#[cfg(test)]
mod concurrency_tests;
