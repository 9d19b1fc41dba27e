use tc_core::Cell;

/// A destination chosen by a [`GoalPolicy`](crate::GoalPolicy).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub cell: Cell,
    /// Claim the cell so no other actor is sent there until released.
    pub reserve: bool,
}

impl Target {
    pub fn at(cell: Cell) -> Self {
        Self { cell, reserve: false }
    }

    pub fn reserved(cell: Cell) -> Self {
        Self { cell, reserve: true }
    }
}
