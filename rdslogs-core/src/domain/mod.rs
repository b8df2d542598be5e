//! Core domain types
//!
//! This module contains the structures that describe what is downloaded
//! (log files) and who is allowed to download it (credentials).

pub mod credentials;
pub mod log_file;
