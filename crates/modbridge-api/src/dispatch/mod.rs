//! Command dispatch and reply rendering

mod dispatcher;
pub mod render;

pub use dispatcher::CommandDispatcher;
