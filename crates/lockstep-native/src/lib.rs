//! Native-bridge detection and hoisting audit for installed JavaScript packages.
//!
//! [`NativeModuleScanner`] walks each package under the root install
//! directory and flags those whose sources reference a native-module base
//! class. [`HoistAuditor`] then checks which flagged packages are missing
//! from the root install location.
//!
//! # Example
//!
//! ```no_run
//! use lockstep_fs::NativeFileSystem;
//! use lockstep_native::{HoistAuditor, NativeModuleScanner, ScanOptions};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = Arc::new(NativeFileSystem::new(".")?);
//! let scanner = NativeModuleScanner::new(fs.clone(), ScanOptions::default())?;
//! let native = scanner.classify_all(&["react-native-svg", "lodash"]).await;
//!
//! let auditor = HoistAuditor::new(fs, "node_modules");
//! println!("not hoisted: {:?}", auditor.audit_hoisting(&native).await);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod hoist;
pub mod scanner;

pub use error::{Result, ScanError};
pub use hoist::HoistAuditor;
pub use scanner::{
    NativeModuleScanner, ScanOptions, DEFAULT_EXTENSIONS, DEFAULT_MAX_CONCURRENT,
    DEFAULT_SIGNATURE,
};
