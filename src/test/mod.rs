//! Shared test support.
//!
//! Everything here is compiled for unit tests only.
