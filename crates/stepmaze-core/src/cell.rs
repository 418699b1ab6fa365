//! The [`CellState`] type: what a grid cell currently is.

/// State of a single grid cell, shared by the maze carver and the search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Open and not yet reached by the current search.
    #[default]
    Undiscovered,
    /// On the search frontier.
    Discovered,
    /// Expanded by the search.
    Visited,
    /// Wall.
    Blocked,
    /// Part of the traced shortest path.
    Path,
}

impl CellState {
    /// Whether the search must never expand or relax into this cell.
    #[inline]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Visited | Self::Blocked)
    }

    /// Whether the cell is passable.
    #[inline]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// One-character picture, as used by [`crate::Grid::render`].
    pub const fn glyph(self) -> char {
        match self {
            Self::Undiscovered => '.',
            Self::Discovered => '+',
            Self::Visited => 'o',
            Self::Blocked => '#',
            Self::Path => '*',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_states() {
        assert!(CellState::Visited.is_closed());
        assert!(CellState::Blocked.is_closed());
        assert!(!CellState::Discovered.is_closed());
        assert!(!CellState::Path.is_closed());
        assert!(!CellState::Blocked.is_open());
    }
}
