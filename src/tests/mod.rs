//! Test suite for the flow builder
//!
//! Unit tests live next to each module; these suites exercise the pieces
//! together the way the builder screen drives them.

#[cfg(test)]
mod editor_tests;
#[cfg(test)]
mod property_tests;
