//! Database entities

pub mod account;
