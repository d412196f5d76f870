//! Command handlers, one module per noun.

pub mod collab;
pub mod company;
