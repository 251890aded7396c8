//! RevX: streaming, Unicode-aware line reverser
//!
//! The library holds everything except process setup. The main binary is at
//! src/main.rs.

pub mod batch;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod logger;
pub mod reverse;
pub mod source;

// Re-export commonly used types for convenience
pub use batch::{BatchSummary, InputSpec, inputs_from_args, process_inputs};
pub use cancel::{CancelToken, Cancellation, Never};
pub use driver::{RunSummary, run};
pub use error::{Result, RevError};
pub use reverse::{ReversalPolicy, reverse};
pub use source::{Line, LineSource};
