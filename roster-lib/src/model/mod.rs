//! Data model types

mod record;
mod reference;
mod user;
mod value;

pub use record::*;
pub use reference::*;
pub use user::*;
pub use value::*;
