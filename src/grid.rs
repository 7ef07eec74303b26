//! Bounded hexagonal grid enumeration.

use bevy::prelude::*;
use hexx::Hex;

use crate::error::EditorError;

/// Enumerates every axial coordinate within `radius` steps of the origin.
///
/// Cells are emitted `q`-ascending, then `r`-ascending, so the output is
/// deterministic. A negative radius is rejected rather than clamped.
pub fn generate(radius: i32) -> Result<Vec<Hex>, EditorError> {
    if radius < 0 {
        return Err(EditorError::NegativeRadius(radius));
    }
    let mut cells = Vec::with_capacity(cell_count(radius.unsigned_abs()));
    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        cells.extend((r_min..=r_max).map(|r| Hex::new(q, r)));
    }
    Ok(cells)
}

/// Number of cells in a hexagon of the given radius: `3r² + 3r + 1`.
pub fn cell_count(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// The clickable cell set for the current session.
///
/// Regenerated as a whole when the radius changes; systems that draw markers
/// react to `resource_changed::<GridCells>`.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct GridCells {
    radius: u32,
    cells: Vec<Hex>,
}

impl GridCells {
    /// Generates the cell set for `radius`.
    pub fn new(radius: i32) -> Result<Self, EditorError> {
        let cells = generate(radius)?;
        Ok(Self {
            radius: radius.unsigned_abs(),
            cells,
        })
    }

    /// Radius the cells were generated for.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Generated cells in emission order.
    pub fn cells(&self) -> &[Hex] {
        &self.cells
    }

    /// Whether `hex` is one of the generated cells.
    pub fn contains(&self, hex: Hex) -> bool {
        hex.ulength() <= self.radius && !self.cells.is_empty()
    }
}
