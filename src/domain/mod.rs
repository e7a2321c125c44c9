pub mod account;
pub mod avatar;
pub mod form;
pub mod payload;
pub mod user;

pub use account::*;
pub use avatar::*;
pub use form::*;
pub use payload::*;
pub use user::*;
