//! Domain model module declarations.

pub mod agent;
pub mod session;
