//! CLI command implementations.

pub(crate) mod attach;
pub(crate) mod serve;

pub(crate) use attach::AttachArgs;
pub(crate) use serve::ServeArgs;
