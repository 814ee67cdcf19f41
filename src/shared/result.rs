/// Type alias for Result with anyhow::Error as the error type.
/// Keeps error handling uniform between ports, adapters and the CLI.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
