//! Shared test utilities for the sectree workspace.
//!
//! This crate provides standardised sample documents and property-test
//! generators so every crate exercises the same adversarial inputs. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`fixtures`]: named documents covering each structural edge case
//! - [`strategies`]: `proptest` strategies generating whole documents

pub mod fixtures;
pub mod strategies;
