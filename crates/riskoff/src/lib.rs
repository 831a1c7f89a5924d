//! Loan affordability and credit risk engines for the RISKOFF lending platform.
//!
//! The engines in [`lending`] are pure calculators: every call receives a fresh snapshot of the
//! applicant and returns a complete, deterministic result. [`config`], [`telemetry`], and
//! [`error`] carry the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod lending;
pub mod money;
pub mod telemetry;
