mod context;
pub mod components;
pub mod contexts;
pub mod export;
pub mod init;
pub mod map;
pub mod resolve;
pub mod snapshot;
pub mod summary;
pub mod tree;

pub use context::CommandContext;
