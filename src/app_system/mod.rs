//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod profile_system;
pub mod tracing;

pub use error::*;
pub use profile_system::*;
pub use self::tracing::*;
