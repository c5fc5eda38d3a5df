//! External service integrations

pub mod quickbooks;
