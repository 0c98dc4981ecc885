//! Live session progress

pub mod reporter;
