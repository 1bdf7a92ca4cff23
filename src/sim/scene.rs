/// Scene buffer: the scrolling grid plus its decorative sky/floor strips,
/// and the cadence that decides which columns carry an obstacle.
///
/// ## Grid layout
///
/// `cells[row][col]`, row 0 at the top, column 0 on the left where the
/// player is drawn. Dimensions are fixed at construction; every mutation
/// happens in place.
///
/// ## Obstacles
///
/// An obstacle is a single column of `Cell::Obstacle` with a 3-row opening
/// centred on a random row in `[1, height-2]`. All other columns are open
/// background.

use rand::Rng;

use crate::domain::cell::Cell;

/// Half-height of the opening in an obstacle column (3 rows total).
pub const GAP_RADIUS: usize = 1;

/// What the next appended column looks like.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColumnKind {
    Open,
    Obstacle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    sky: Vec<Cell>,
    floor: Vec<Cell>,
}

impl Scene {
    pub fn new(width: usize, height: usize) -> Self {
        let mut scene = Scene {
            width,
            height,
            cells: Vec::new(),
            sky: Vec::new(),
            floor: Vec::new(),
        };
        scene.initialize();
        scene
    }

    /// Fill the grid with background and rebuild the sky and floor strips.
    /// Calling it again hard-resets the run's scenery.
    pub fn initialize(&mut self) {
        self.cells = vec![vec![Cell::Background; self.width]; self.height];
        self.sky = vec![Cell::Sky; self.width];
        self.floor = vec![Cell::Floor; self.width];
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn cells(&self) -> &[Vec<Cell>] { &self.cells }
    pub fn sky(&self) -> &[Cell] { &self.sky }
    pub fn floor(&self) -> &[Cell] { &self.floor }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite a single cell. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(c) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *c = cell;
        }
    }

    /// Scroll one column left: column x takes the value of column x+1.
    /// The last column keeps its old value until `append_column` fills it.
    pub fn shift_left(&mut self) {
        for row in &mut self.cells {
            row.copy_within(1.., 0);
        }
    }

    /// Populate the last column. Returns the gap centre for obstacle columns.
    pub fn append_column<R: Rng>(&mut self, kind: ColumnKind, rng: &mut R) -> Option<usize> {
        let last = self.width - 1;
        match kind {
            ColumnKind::Open => {
                for row in &mut self.cells {
                    row[last] = Cell::Background;
                }
                None
            }
            ColumnKind::Obstacle => {
                let center = rng.gen_range(1..=self.height - 2);
                for (y, row) in self.cells.iter_mut().enumerate() {
                    row[last] = if y.abs_diff(center) <= GAP_RADIUS {
                        Cell::Background
                    } else {
                        Cell::Obstacle
                    };
                }
                Some(center)
            }
        }
    }
}

/// Emits one obstacle column every `spacing` ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleCadence {
    spacing: u32,
    counter: u32,
}

impl ObstacleCadence {
    pub fn new(spacing: u32) -> Self {
        ObstacleCadence { spacing: spacing.max(1), counter: 0 }
    }

    #[allow(dead_code)]
    pub fn spacing(&self) -> u32 { self.spacing }
    pub fn counter(&self) -> u32 { self.counter }

    /// Advance one tick and report the kind of column to append.
    pub fn advance(&mut self) -> ColumnKind {
        self.counter += 1;
        if self.counter >= self.spacing {
            self.counter = 0;
            ColumnKind::Obstacle
        } else {
            ColumnKind::Open
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn column(scene: &Scene, col: usize) -> Vec<Cell> {
        (0..scene.height()).map(|y| scene.get(y, col)).collect()
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut a = Scene::new(60, 10);
        let b = Scene::new(60, 10);
        a.initialize();
        assert_eq!(a, b);
        a.initialize();
        assert_eq!(a, b);
    }

    #[test]
    fn initialize_hard_resets() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = Scene::new(8, 5);
        s.append_column(ColumnKind::Obstacle, &mut rng);
        s.set(2, 0, Cell::Player);
        s.initialize();
        assert_eq!(s, Scene::new(8, 5));
    }

    #[test]
    fn strips_are_sky_and_floor() {
        let s = Scene::new(6, 4);
        assert!(s.sky().iter().all(|&c| c == Cell::Sky));
        assert!(s.floor().iter().all(|&c| c == Cell::Floor));
        assert_eq!(s.sky().len(), 6);
        assert_eq!(s.cells().len(), 4);
    }

    #[test]
    fn shift_left_moves_every_row() {
        let mut s = Scene::new(4, 3);
        s.set(0, 3, Cell::Obstacle);
        s.set(2, 1, Cell::Obstacle);
        s.shift_left();
        assert_eq!(s.get(0, 2), Cell::Obstacle);
        assert_eq!(s.get(2, 0), Cell::Obstacle);
        assert_eq!(s.get(2, 1), Cell::Background);
    }

    #[test]
    fn obstacle_column_has_three_row_gap() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut s = Scene::new(5, 10);
            let center = s.append_column(ColumnKind::Obstacle, &mut rng).unwrap();
            assert!((1..=8).contains(&center));

            let col = column(&s, 4);
            let open: Vec<usize> = (0..10).filter(|&y| col[y] == Cell::Background).collect();
            assert_eq!(open, vec![center - 1, center, center + 1]);
        }
    }

    #[test]
    fn open_column_is_all_background() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = Scene::new(5, 10);
        s.append_column(ColumnKind::Obstacle, &mut rng);
        assert_eq!(s.append_column(ColumnKind::Open, &mut rng), None);
        assert!(column(&s, 4).iter().all(|&c| c == Cell::Background));
    }

    #[test]
    fn dimensions_never_change() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = Scene::new(12, 6);
        let mut cadence = ObstacleCadence::new(5);
        for _ in 0..100 {
            s.shift_left();
            s.append_column(cadence.advance(), &mut rng);
        }
        assert_eq!(s.cells().len(), 6);
        assert!(s.cells().iter().all(|r| r.len() == 12));
    }

    // ── ObstacleCadence ──

    #[test]
    fn cadence_has_period_spacing() {
        let mut c = ObstacleCadence::new(17);
        let kinds: Vec<ColumnKind> = (0..17 * 6).map(|_| c.advance()).collect();
        for window in kinds.chunks(17) {
            let obstacles = window.iter().filter(|&&k| k == ColumnKind::Obstacle).count();
            assert_eq!(obstacles, 1);
            assert_eq!(window[16], ColumnKind::Obstacle);
        }
        assert_eq!(c.counter(), 0);
    }

    #[test]
    fn counter_stays_below_spacing() {
        let mut c = ObstacleCadence::new(17);
        for _ in 0..1000 {
            c.advance();
            assert!(c.counter() < c.spacing());
        }
    }
}
