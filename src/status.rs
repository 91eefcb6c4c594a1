//! Exit status constants and the host-boundary clamp.

/// Handler completed successfully.
pub const SUCCESS: i32 = 0;

/// Handler failed.
pub const FAILURE: i32 = 1;

/// Invocation could not be resolved against the command's parameters.
pub const INVALID: i32 = 2;

/// Clamp a handler's return value into the valid exit-status range.
/// Negative values clamp to `0`, values above `255` clamp to `255`.
pub fn clamp(status: i32) -> i32 {
    status.clamp(0, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-1), 0);
        assert_eq!(clamp(0), 0);
        assert_eq!(clamp(1), 1);
        assert_eq!(clamp(255), 255);
        assert_eq!(clamp(256), 255);
        assert_eq!(clamp(i32::MAX), 255);
        assert_eq!(clamp(i32::MIN), 0);
    }
}
