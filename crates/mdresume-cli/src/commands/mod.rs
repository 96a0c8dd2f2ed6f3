//! Command handlers

pub mod config;
pub mod resume;
pub mod status;
pub mod transfer;
