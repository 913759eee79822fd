use oasis_data::GridKey;
use std::collections::HashMap;
use uuid::Uuid;

/// One reserved ground cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub cell: GridKey,
    pub owner: Uuid,
    /// Snapshot of the owner's enabled flag; `false` marks the claim for
    /// [`SpatialOccupancy::compact`].
    pub owner_enabled: bool,
}

/// Shared map from integer ground cell to the organism holding it.
///
/// Used by moving animals to avoid stepping onto a cell someone else holds.
/// Exclusion is optimistic: [`reserve`](Self::reserve) overwrites, so two
/// spawns landing on one cell leave only the later claim. Movement always
/// checks [`is_blocked_for`](Self::is_blocked_for) before claiming.
///
/// # Implementation Notes
/// - One entry per cell; a cell can never report two owners
/// - Owners are identities, not handles, so a claim never dangles after the
///   owner is despawned; at worst it goes stale until the next compaction
/// - Writers take `&mut self`, which serializes every commit within a tick
///
/// # Examples
/// ```
/// use oasis_core::occupancy::SpatialOccupancy;
/// use oasis_data::GridKey;
/// use uuid::Uuid;
///
/// let mut occupancy = SpatialOccupancy::new();
/// let owner = Uuid::new_v4();
/// occupancy.reserve(GridKey::new(5, 0), owner, true);
/// assert_eq!(occupancy.occupant(GridKey::new(5, 0)), Some(owner));
/// assert!(occupancy.is_blocked_for(GridKey::new(5, 0), Uuid::new_v4()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpatialOccupancy {
    cells: HashMap<GridKey, Claim>,
}

impl SpatialOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `cell` for `owner`, replacing whatever was there.
    pub fn reserve(&mut self, cell: GridKey, owner: Uuid, owner_enabled: bool) {
        self.cells.insert(
            cell,
            Claim {
                cell,
                owner,
                owner_enabled,
            },
        );
    }

    /// Removes the claim on `cell`, whoever holds it.
    pub fn release(&mut self, cell: GridKey) -> Option<Claim> {
        self.cells.remove(&cell)
    }

    /// Removes the claim on `cell` only if `owner` holds it.
    ///
    /// An organism whose claim was overwritten by a later spawn must not evict
    /// the newcomer when it moves away or dies.
    pub fn release_owned(&mut self, cell: GridKey, owner: Uuid) -> bool {
        match self.cells.get(&cell) {
            Some(claim) if claim.owner == owner => {
                self.cells.remove(&cell);
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn occupant(&self, cell: GridKey) -> Option<Uuid> {
        self.cells.get(&cell).map(|c| c.owner)
    }

    /// True when `cell` is held by anyone other than `id`.
    #[inline]
    pub fn is_blocked_for(&self, cell: GridKey, id: Uuid) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.owner != id)
    }

    /// Updates the enabled snapshot on `owner`'s claim. Returns whether a claim
    /// owned by `owner` was found.
    pub fn set_enabled(&mut self, cell: GridKey, owner: Uuid, enabled: bool) -> bool {
        match self.cells.get_mut(&cell) {
            Some(claim) if claim.owner == owner => {
                claim.owner_enabled = enabled;
                true
            }
            _ => false,
        }
    }

    /// Drops every claim whose owner was disabled. Returns how many went.
    ///
    /// Run by the driver between ticks rather than on every move.
    pub fn compact(&mut self) -> usize {
        let before = self.cells.len();
        self.cells.retain(|_, claim| claim.owner_enabled);
        let removed = before - self.cells.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.cells.len(), "Occupancy compacted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.cells.values()
    }

    /// Cells currently held by `owner`. Normally zero or one.
    pub fn cells_of(&self, owner: Uuid) -> Vec<GridKey> {
        let mut cells: Vec<_> = self
            .cells
            .values()
            .filter(|c| c.owner == owner)
            .map(|c| c.cell)
            .collect();
        cells.sort();
        cells
    }
}
