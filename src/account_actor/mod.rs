//! Account records served by the local account service.

mod actions;
pub mod entity;

pub use actions::*;
