//! Shared test helpers for `meetgrid-core` integration tests.
//!
//! These helpers provide reusable fixtures and a lightweight repository mock
//! so the workflow tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
