// Chunk: docs/chunks/text_buffer - Line-oriented text buffer with gap buffer backing

/// Location in the buffer as `(x, y)`: `x` is the column in characters and
/// `y` is the 0-indexed line.
///
/// Ordering is document order (line first, then column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Loc {
    pub x: usize,
    pub y: usize,
}

impl Loc {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The first location of every buffer.
    pub const ORIGIN: Loc = Loc { x: 0, y: 0 };
}

impl PartialOrd for Loc {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Loc {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_orders_by_line_then_column() {
        assert!(Loc::new(5, 0) < Loc::new(0, 1));
        assert!(Loc::new(1, 2) < Loc::new(3, 2));
        assert_eq!(Loc::new(2, 2).max(Loc::new(1, 3)), Loc::new(1, 3));
    }

    #[test]
    fn test_origin_is_default() {
        assert_eq!(Loc::ORIGIN, Loc::default());
    }
}
