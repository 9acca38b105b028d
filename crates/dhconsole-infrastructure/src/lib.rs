//! Filesystem side of the console: config and secret file locations and
//! their atomic persistence.

pub mod paths;
pub mod storage;

pub use paths::{ConsolePaths, PathError};
pub use storage::{ConfigStorage, ConfigStorageError, SecretStorage, SecretStorageError};
