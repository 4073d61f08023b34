//! # IO Module
//!
//! Adapter layer between HTTP clients (the breeder entry form and the admin
//! view) and the domain.
//!
//! ## Supported Operations
//!
//! - **POST /api/records/save**: create or replace a day's record
//! - **PUT /api/records/update**: patch an existing day's record
//! - **DELETE /api/records/delete**: remove a day's record
//! - **GET /api/flock/all-data**: every flock
//! - **GET /api/flock/data/:flockId**: one flock

pub mod rest;

pub use rest::flock_apis::*;
pub use rest::record_apis::*;
