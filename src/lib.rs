//! AHP Panel - Expert weighting with the Analytic Hierarchy Process
//!
//! Experts register, submit pairwise comparison matrices for each level of a
//! fixed two-level criteria hierarchy, and the panel aggregates their
//! judgments into group weights with consistency and agreement diagnostics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
