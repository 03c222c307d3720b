//! Result type alias for PhiGuard

use super::errors::PhiGuardError;

/// Result type alias for PhiGuard operations
///
/// # Examples
///
/// ```
/// use phiguard::domain::result::Result;
/// use phiguard::domain::errors::PhiGuardError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PhiGuardError::Decryption)
/// }
/// ```
pub type Result<T> = std::result::Result<T, PhiGuardError>;
