/// Exit codes for mdstrip
///
/// Success - Every qualifying document was processed
pub const SUCCESS: i32 = 0;

/// Tool error - Missing source directory, configuration error, or a file that could not be
/// read or written
pub const TOOL_ERROR: i32 = 1;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with tool error code (1)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
