mod args;
mod event;

pub use args::*;
pub use event::*;
