//! Total Cost of Employment engine for Iranian payroll rules
//!
//! This crate computes an employer's true monthly cost of an employee from a
//! set of compensation inputs under Iranian labour, tax and social insurance
//! rules, for both gross and net contracts. The calculation is pure; the
//! progressive tax schedule is injected as versioned configuration.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
