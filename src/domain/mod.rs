//! Domain types shared by every PhiGuard component.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PhiGuardError>`]:
//!
//! ```rust
//! use phiguard::domain::{PhiGuardError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = phiguard::config::load_config("phiguard.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::PhiGuardError;
pub use result::Result;
