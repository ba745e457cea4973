//! Index arithmetic shared by every list-like control.

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        (index - 1) % len
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Steps `index` forward or backward within `len`, wrapping at both ends.
pub const fn wrap_step(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        wrap_increment(index, len)
    } else {
        wrap_decrement(index, len)
    }
}
