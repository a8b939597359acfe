use rand::Rng;

use crate::config::GameConfig;
use crate::{Coord, Pos};

/// Contents of one board cell. `Border` and `Obstacle` are equivalent for
/// collision purposes but kept apart so they can diverge later.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Border,
    Obstacle,
    Item,
}

impl Cell {
    pub fn blocks(self) -> bool {
        matches!(self, Cell::Border | Cell::Obstacle)
    }
}

/// The playing field: a fixed-shape grid whose cell contents mutate as
/// obstacles are stamped and items spawn and get eaten. Also owns the four
/// portal coordinates, which are walkable gaps in the border.
pub struct Board {
    width: Coord,
    height: Coord,
    cells: Vec<Cell>,
    portal_left: Pos,
    portal_right: Pos,
    portal_top: Pos,
    portal_bottom: Pos,
}

impl Board {
    pub fn new(cfg: &GameConfig) -> Self {
        let portals = [cfg.portal_left, cfg.portal_right, cfg.portal_top, cfg.portal_bottom];
        let mut cells = vec![Cell::Empty; cfg.width as usize * cfg.height as usize];

        for y in 0..cfg.height {
            for x in 0..cfg.width {
                let on_edge = x == 0 || x == cfg.width - 1 || y == 0 || y == cfg.height - 1;
                if on_edge && !portals.contains(&(x, y)) {
                    cells[y as usize * cfg.width as usize + x as usize] = Cell::Border;
                }
            }
        }

        Board {
            width: cfg.width,
            height: cfg.height,
            cells,
            portal_left: cfg.portal_left,
            portal_right: cfg.portal_right,
            portal_top: cfg.portal_top,
            portal_bottom: cfg.portal_bottom,
        }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn portal_left(&self) -> Pos {
        self.portal_left
    }

    pub fn portal_right(&self) -> Pos {
        self.portal_right
    }

    pub fn portal_top(&self) -> Pos {
        self.portal_top
    }

    pub fn portal_bottom(&self) -> Pos {
        self.portal_bottom
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 >= 0 && pos.0 < self.width && pos.1 >= 0 && pos.1 < self.height
    }

    /// Precondition: `pos` is on the board. Callers resolve portal exits
    /// before indexing; the board never wraps internally.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        let i = self.index(pos);
        self.cells[i] = cell;
    }

    /// Stamps `cfg.obstacle_count` squares of side `cfg.obstacle_side` at
    /// random anchors within the margin band. An anchor whose square would
    /// overlap the snake's initial cells is shifted down by one side length,
    /// exactly once and without re-sampling; obstacles may overlap each
    /// other or a portal-adjacent cell.
    pub fn place_obstacles(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        let side = cfg.obstacle_side;
        let (start_x, start_y) = cfg.start;
        let snake_min_x = start_x - (cfg.initial_length as Coord - 1);

        for _ in 0..cfg.obstacle_count {
            let x = rng.gen_range(cfg.anchor_x_range.0..=cfg.anchor_x_range.1);
            let mut y = rng.gen_range(cfg.anchor_y_range.0..=cfg.anchor_y_range.1);

            let rows_overlap = y <= start_y && y + side - 1 >= start_y;
            let cols_overlap = x <= start_x && x + side - 1 >= snake_min_x;
            if rows_overlap && cols_overlap {
                y += side;
            }

            for dy in 0..side {
                for dx in 0..side {
                    self.set_cell((x + dx, y + dy), Cell::Obstacle);
                }
            }
        }
    }

    /// Places a new item on a uniformly chosen interior cell that is empty
    /// and not under the snake, and returns its position. Loops until such
    /// a cell is found; with the standard config the occupied cells are a
    /// tiny fraction of the interior, so starvation is unreachable in
    /// practice.
    pub fn spawn_item(&mut self, cfg: &GameConfig, snake_cells: &[Pos], rng: &mut impl Rng) -> Pos {
        let (x_min, x_max) = cfg.interior_x_range();
        let (y_min, y_max) = cfg.interior_y_range();

        loop {
            let pos = (rng.gen_range(x_min..=x_max), rng.gen_range(y_min..=y_max));
            if self.cell_at(pos) == Cell::Empty && !snake_cells.contains(&pos) {
                self.set_cell(pos, Cell::Item);
                return pos;
            }
        }
    }

    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "cell access out of range: {:?}", pos);
        pos.1 as usize * self.width as usize + pos.0 as usize
    }
}
