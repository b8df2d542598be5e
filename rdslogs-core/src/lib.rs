//! rdslogs Core
//!
//! Core types shared by the rdslogs client and command-line tool.
//!
//! This crate contains:
//! - Domain types: the log files an RDS instance exposes and the credentials
//!   used to sign requests against the service
//! - DTOs: shapes of paginated service responses

pub mod domain;
pub mod dto;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";
