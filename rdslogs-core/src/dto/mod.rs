//! Data Transfer Objects (DTOs)
//!
//! Shapes of data exchanged with the database service that are not domain
//! entities on their own.

pub mod log_file;
