//! Chain execution

pub mod notify;
pub mod runner;

pub use notify::{ChainEvent, ChainExit, EventHandler, ExitHandler, HandlerId};
pub use runner::ChainRunner;
