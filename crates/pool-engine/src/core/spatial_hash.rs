use std::collections::HashMap;

use glam::{IVec2, Vec2};

/// Neighbour cells that come "after" a cell in row-major order. Visiting
/// only these from every occupied cell enumerates each unordered pair of
/// adjacent cells exactly once.
const FORWARD_NEIGHBORS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

struct Cell {
    key: IVec2,
    members: Vec<usize>,
}

/// Uniform-grid broad phase over ball positions.
///
/// Stores indices into the caller's ball slice, never the balls themselves.
/// Rebuilt from scratch every sub-step. Cells are kept in insertion order so
/// the emitted pair list is deterministic for a given ball order.
pub struct SpatialHash {
    cell_size: f32,
    lookup: HashMap<IVec2, usize>,
    cells: Vec<Cell>,
    /// Emptied cells kept around to reuse their allocations.
    spare: Vec<Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            lookup: HashMap::with_capacity(32),
            cells: Vec::with_capacity(32),
            spare: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid coordinate of the cell containing `position`.
    pub fn cell_of(&self, position: Vec2) -> IVec2 {
        (position / self.cell_size).floor().as_ivec2()
    }

    pub fn clear(&mut self) {
        self.lookup.clear();
        for mut cell in self.cells.drain(..) {
            cell.members.clear();
            self.spare.push(cell.members);
        }
    }

    pub fn insert(&mut self, index: usize, position: Vec2) {
        let key = self.cell_of(position);
        let slot = match self.lookup.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.cells.len();
                let members = self.spare.pop().unwrap_or_default();
                self.cells.push(Cell { key, members });
                self.lookup.insert(key, slot);
                slot
            }
        };
        self.cells[slot].members.push(index);
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Append every candidate pair to `out`: all pairs sharing a cell, then
    /// all pairs across adjacent cells. No pair appears twice and no index is
    /// paired with itself. Candidates are not distance-checked.
    pub fn pairs_into(&self, out: &mut Vec<(usize, usize)>) {
        for cell in &self.cells {
            let members = &cell.members;
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    out.push((members[i], members[j]));
                }
            }

            for offset in FORWARD_NEIGHBORS {
                let Some(&slot) = self.lookup.get(&(cell.key + offset)) else {
                    continue;
                };
                for &a in members {
                    for &b in &self.cells[slot].members {
                        out.push((a, b));
                    }
                }
            }
        }
    }

    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        self.pairs_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// xorshift64, enough to scatter test balls deterministically.
    struct TestRng(u64);

    impl TestRng {
        fn next_f32(&mut self) -> f32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 40) as f32 / (1u64 << 24) as f32
        }
    }

    fn normalized(pair: (usize, usize)) -> (usize, usize) {
        (pair.0.min(pair.1), pair.0.max(pair.1))
    }

    #[test]
    fn forward_neighbors_follow_row_major_order() {
        for offset in FORWARD_NEIGHBORS {
            assert!(offset.y > 0 || (offset.y == 0 && offset.x > 0));
        }
        assert_eq!(FORWARD_NEIGHBORS.len(), 4);
    }

    #[test]
    fn cell_key_floors_negative_positions() {
        let hash = SpatialHash::new(56.0);
        assert_eq!(hash.cell_of(Vec2::new(10.0, 10.0)), IVec2::new(0, 0));
        assert_eq!(hash.cell_of(Vec2::new(-1.0, 57.0)), IVec2::new(-1, 1));
        assert_eq!(hash.cell_of(Vec2::new(112.0, -0.5)), IVec2::new(2, -1));
    }

    #[test]
    fn same_cell_pairs() {
        let mut hash = SpatialHash::new(56.0);
        hash.insert(0, Vec2::new(10.0, 10.0));
        hash.insert(1, Vec2::new(20.0, 10.0));
        hash.insert(2, Vec2::new(30.0, 10.0));
        let pairs: HashSet<_> = hash.pairs().into_iter().map(normalized).collect();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&(0, 1)));
        assert!(pairs.contains(&(0, 2)));
        assert!(pairs.contains(&(1, 2)));
    }

    #[test]
    fn diagonal_neighbors_paired_once() {
        let mut hash = SpatialHash::new(56.0);
        // Anti-diagonal cells: (1, 0) and (0, 1).
        hash.insert(0, Vec2::new(60.0, 50.0));
        hash.insert(1, Vec2::new(50.0, 60.0));
        let pairs = hash.pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(normalized(pairs[0]), (0, 1));
    }

    #[test]
    fn distant_balls_not_paired() {
        let mut hash = SpatialHash::new(56.0);
        hash.insert(0, Vec2::new(10.0, 10.0));
        hash.insert(1, Vec2::new(500.0, 400.0));
        assert!(hash.pairs().is_empty());
    }

    #[test]
    fn clear_empties_grid() {
        let mut hash = SpatialHash::new(56.0);
        hash.insert(0, Vec2::new(10.0, 10.0));
        hash.insert(1, Vec2::new(12.0, 10.0));
        hash.clear();
        assert_eq!(hash.occupied_cells(), 0);
        assert!(hash.pairs().is_empty());
        hash.insert(2, Vec2::new(12.0, 10.0));
        hash.insert(3, Vec2::new(14.0, 10.0));
        assert_eq!(hash.pairs(), vec![(2, 3)]);
    }

    #[test]
    fn pairs_cover_all_close_balls_without_duplicates() {
        let cell_size = 56.0;
        let mut rng = TestRng(0x9E37_79B9_7F4A_7C15);

        for _ in 0..20 {
            let positions: Vec<Vec2> = (0..40)
                .map(|_| Vec2::new(rng.next_f32() * 400.0 - 50.0, rng.next_f32() * 250.0 - 50.0))
                .collect();

            let mut hash = SpatialHash::new(cell_size);
            for (i, p) in positions.iter().enumerate() {
                hash.insert(i, *p);
            }
            let pairs = hash.pairs();

            let mut seen = HashSet::new();
            for pair in &pairs {
                assert_ne!(pair.0, pair.1, "self pair emitted");
                assert!(seen.insert(normalized(*pair)), "duplicate pair {:?}", pair);
            }

            for i in 0..positions.len() {
                for j in (i + 1)..positions.len() {
                    if positions[i].distance(positions[j]) < cell_size {
                        assert!(seen.contains(&(i, j)), "missing close pair ({}, {})", i, j);
                    }
                }
            }
        }
    }

    #[test]
    fn pair_order_is_deterministic() {
        let positions = [
            Vec2::new(100.0, 100.0),
            Vec2::new(120.0, 110.0),
            Vec2::new(150.0, 100.0),
            Vec2::new(170.0, 160.0),
        ];
        let build = || {
            let mut hash = SpatialHash::new(56.0);
            for (i, p) in positions.iter().enumerate() {
                hash.insert(i, *p);
            }
            hash.pairs()
        };
        assert_eq!(build(), build());
    }
}
