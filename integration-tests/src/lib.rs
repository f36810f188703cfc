pub mod harness;

pub use harness::Workspace;
