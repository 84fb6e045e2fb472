pub mod args;
pub mod error;
pub mod media;
pub mod metadata;
pub mod processor;
pub mod report;
pub mod sidecar;
pub mod writer;
