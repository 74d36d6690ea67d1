//! Profile backend operations

mod reference;
mod users;
