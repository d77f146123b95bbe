//! Unit tests for the task event module.
//!
//! Tests are organised by concern: domain values, column extraction,
//! identity allocation and resolution, configuration, row projection, and
//! the storage schema contract.
