//! Durastore: durable orchestration state storage.
//!
//! This crate persists inter-task messages of a durable orchestration engine
//! into a relational store so orchestration state survives process
//! restarts.
//!
//! # Architecture
//!
//! Durastore follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task_event`]: Task message to row projection with payload
//!   deduplication

pub mod task_event;
