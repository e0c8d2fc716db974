//! Exit-code mapping policy:
//! - 130 for user cancellation (and nothing printed: cancelling is not a
//!   failure).
//! - 127 when an external binary is missing (io NotFound / which lookup).
//! - 1 for everything else.
//! - `git worktree` passthrough propagates the child's code unchanged.

use std::io;

use crate::select::SelectError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 127;
pub const EXIT_CANCELLED: u8 = 130;

/// True when the error chain bottoms out in a user cancellation.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<SelectError>(),
            Some(SelectError::Cancelled)
        )
    })
}

/// Map an error chain to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if is_cancelled(err) {
        return EXIT_CANCELLED;
    }
    for cause in err.chain() {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::NotFound {
                return EXIT_NOT_FOUND;
            }
        }
        if cause.downcast_ref::<which::Error>().is_some() {
            return EXIT_NOT_FOUND;
        }
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_cancellation_maps_to_130() {
        let err = anyhow::Error::from(SelectError::Cancelled);
        assert!(is_cancelled(&err));
        assert_eq!(exit_code_for(&err), EXIT_CANCELLED);

        // Context wrapping must not hide the cancellation.
        let wrapped = Err::<(), _>(SelectError::Cancelled)
            .context("while selecting")
            .unwrap_err();
        assert!(is_cancelled(&wrapped));
    }

    #[test]
    fn test_missing_binary_maps_to_127() {
        let err = anyhow::Error::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(exit_code_for(&err), EXIT_NOT_FOUND);
    }

    #[test]
    fn test_generic_error_maps_to_1() {
        assert_eq!(exit_code_for(&anyhow!("boom")), EXIT_FAILURE);
        let err = anyhow::Error::from(SelectError::NoItems);
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    }
}
