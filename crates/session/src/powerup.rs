use mazerun_common::CellCoord;
use mazerun_kernel::{CarveRng, Grid};
use serde::{Deserialize, Serialize};

/// What a collected powerup improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Jump,
    Speed,
}

/// How many powerups each maze gets and what one is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Powerups scattered per maze, capped by the free cells.
    pub count: usize,
    /// Added to the jump or speed bonus on pickup.
    pub bonus: f32,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            count: 3,
            bonus: 0.5,
        }
    }
}

/// Bonuses collected so far. They survive maze resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bonuses {
    pub jump: f32,
    pub speed: f32,
}

impl Bonuses {
    pub(crate) fn apply(&mut self, kind: PowerupKind, amount: f32) {
        match kind {
            PowerupKind::Jump => self.jump += amount,
            PowerupKind::Speed => self.speed += amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Powerup {
    pub cell: CellCoord,
    pub kind: PowerupKind,
}

/// Uncollected powerups of the current maze, at most one per cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Powerups {
    placed: Vec<Powerup>,
}

impl Powerups {
    /// Place up to `count` powerups on distinct cells other than `avoid`.
    ///
    /// Cells come from a partial shuffle; each powerup is a coin flip
    /// between jump and speed.
    pub fn scatter<R: CarveRng + ?Sized>(
        grid: &Grid,
        avoid: CellCoord,
        count: usize,
        rng: &mut R,
    ) -> Self {
        let mut free: Vec<CellCoord> = grid
            .cells()
            .map(|cell| cell.coord())
            .filter(|coord| *coord != avoid)
            .collect();
        let count = count.min(free.len());

        let mut placed = Vec::with_capacity(count);
        for i in 0..count {
            let j = i + rng.pick(free.len() - i);
            free.swap(i, j);
            let kind = if rng.chance(0.5) {
                PowerupKind::Jump
            } else {
                PowerupKind::Speed
            };
            placed.push(Powerup {
                cell: free[i],
                kind,
            });
        }
        tracing::debug!(placed = placed.len(), "powerups scattered");
        Self { placed }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Powerup> {
        self.placed.iter()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// `true` if an uncollected powerup sits on `cell`.
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.placed.iter().any(|p| p.cell == cell)
    }

    /// Remove and return the powerup on `cell`, if any.
    pub fn take(&mut self, cell: CellCoord) -> Option<PowerupKind> {
        let index = self.placed.iter().position(|p| p.cell == cell)?;
        Some(self.placed.swap_remove(index).kind)
    }
}
