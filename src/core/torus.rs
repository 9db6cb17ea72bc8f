//! Toroidal coordinate arithmetic for the 2D lattice engines.
//!
//! Shift offsets are at most one grid cell in either direction, so wrapping
//! only ever has to correct by a single period.

/// Wraps a (possibly negative, possibly overflowing) coordinate onto
/// `[0, len)`.
pub(crate) fn wrap(coord: isize, len: usize) -> usize {
    let len = len as isize;
    let mut c = coord;
    if c >= len {
        c -= len;
    }
    if c < 0 {
        c += len;
    }
    c as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_inside_range_is_identity() {
        assert_eq!(wrap(0, 5), 0);
        assert_eq!(wrap(4, 5), 4);
    }

    #[test]
    fn wrap_past_end() {
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(6, 5), 1);
    }

    #[test]
    fn wrap_negative() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-2, 5), 3);
    }
}
