//! Room membership handlers (JOIN, PART).

mod join;
mod part;

pub use join::JoinHandler;
pub use part::PartHandler;
