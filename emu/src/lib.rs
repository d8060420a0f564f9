mod error;
pub mod hooks;
mod machine;
mod model;

pub use error::Error;
pub use hooks::{dump::Dump, Hook};
pub use machine::Machine;
pub use model::State;
