//! Form state: field values and errors, validation rules and focus order.

pub mod focus;
pub mod registry;
pub mod validator;

pub use focus::*;
pub use registry::*;
pub use validator::*;
