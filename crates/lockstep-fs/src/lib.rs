//! Filesystem abstraction for lockstep.
//!
//! Every analysis step reads the project through the [`FileSystem`] trait so
//! the engine can be driven against a real checkout ([`NativeFileSystem`]) or
//! a test double. All paths are resolved against, and confined to, a single
//! project root.
//!
//! # Example
//!
//! ```no_run
//! use lockstep_fs::{FileSystem, NativeFileSystem};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> std::io::Result<()> {
//! let fs = NativeFileSystem::new(".")?;
//! let lockfile = fs.read_to_string(Path::new("yarn.lock")).await?;
//! println!("{} bytes", lockfile.len());
//! # Ok(())
//! # }
//! ```

mod file_system;
pub use file_system::{DiscoveryOptions, FileMetadata, FileSystem};

pub mod native;
pub use native::NativeFileSystem;
