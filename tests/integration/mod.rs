//! Shared infrastructure for the resolution integration tests.

#![allow(dead_code)]

pub mod helpers;
