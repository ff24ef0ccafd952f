use thiserror::Error;

/// Errors raised by sequence operations.
///
/// A callback that fails while an element is forced is not represented
/// here: it panics, and the panic reaches the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A structural mutator was called on an immutable sequence.
    #[error("cannot call {operation}() on an immutable sequence")]
    Unsupported { operation: &'static str },
    /// An index was outside of the sequence.
    #[error("index {index} out of bounds for sequence of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },
    /// A subrange was reversed or reached past the end of the sequence.
    #[error("invalid range {from}..{to} for sequence of size {size}")]
    InvalidRange { from: usize, to: usize, size: usize },
    /// An argument had a value the operation cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

#[inline]
pub(crate) fn check_index(index: usize, size: usize) -> Result<usize> {
    if index < size {
        Ok(index)
    } else {
        Err(Error::IndexOutOfBounds { index, size })
    }
}

// an insertion position may be equal to the size
#[inline]
pub(crate) fn check_position(index: usize, size: usize) -> Result<usize> {
    if index <= size {
        Ok(index)
    } else {
        Err(Error::IndexOutOfBounds { index, size })
    }
}

#[inline]
pub(crate) fn check_range(from: usize, to: usize, size: usize) -> Result<()> {
    if from <= to && to <= size {
        Ok(())
    } else {
        Err(Error::InvalidRange { from, to, size })
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_messages() {
        assert_snapshot!(
            Error::Unsupported { operation: "insert" }.to_string(),
            @"cannot call insert() on an immutable sequence"
        );
        assert_snapshot!(
            Error::IndexOutOfBounds { index: 5, size: 3 }.to_string(),
            @"index 5 out of bounds for sequence of size 3"
        );
        assert_snapshot!(
            Error::InvalidRange { from: 2, to: 1, size: 3 }.to_string(),
            @"invalid range 2..1 for sequence of size 3"
        );
    }

    #[test]
    fn test_checks() {
        assert_eq!(check_index(2, 3), Ok(2));
        assert_eq!(
            check_index(3, 3),
            Err(Error::IndexOutOfBounds { index: 3, size: 3 })
        );
        assert_eq!(check_position(3, 3), Ok(3));
        assert!(check_range(0, 3, 3).is_ok());
        assert!(check_range(3, 3, 3).is_ok());
        assert_eq!(
            check_range(2, 1, 3),
            Err(Error::InvalidRange {
                from: 2,
                to: 1,
                size: 3
            })
        );
        assert!(check_range(1, 4, 3).is_err());
    }
}
