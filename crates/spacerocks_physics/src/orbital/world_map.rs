//! World frames and the tiled world map

use bitflags::bitflags;
use spacerocks_math::Vec2;

use super::Planet;

/// Frame-local coordinates span `[-FRAME_EXTENT, FRAME_EXTENT]` on both axes
pub const FRAME_EXTENT: f32 = 1.0;

bitflags! {
    /// Edges of a frame
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FrameEdges: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const TOP = 1 << 3;
    }
}

/// One screen of the world
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldFrame {
    planets: Vec<Planet>,
}

impl WorldFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a planet
    pub fn add_planet(&mut self, planet: Planet) {
        self.planets.push(planet);
    }

    /// Builder: add a planet
    pub fn with_planet(mut self, planet: Planet) -> Self {
        self.add_planet(planet);
        self
    }

    /// Get the planets
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Sum of every planet's pull on `point`
    pub fn gravity_at(&self, point: Vec2) -> Vec2 {
        self.planets
            .iter()
            .fold(Vec2::ZERO, |acc, planet| acc + planet.pull_on(point))
    }

    /// Index of the first planet containing `point`
    pub fn planet_at(&self, point: Vec2) -> Option<usize> {
        self.planets.iter().position(|p| p.contains(point))
    }
}

/// Column/row of a frame in the map; row 0 is the bottom row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameCoord {
    pub column: usize,
    pub row: usize,
}

impl FrameCoord {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl std::fmt::Display for FrameCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// A grid of frames with one current frame
///
/// Leaving the current frame through an edge moves to the neighboring frame
/// and wraps the position to the opposite edge. The outer border of the map
/// is solid.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldMap {
    columns: usize,
    rows: usize,
    /// Row-major, bottom row first
    frames: Vec<WorldFrame>,
    start: FrameCoord,
    current: FrameCoord,
}

impl WorldMap {
    /// Create a map from row-major frames (bottom row first)
    ///
    /// Missing frames are filled with empty ones and extras are dropped.
    /// The start frame is clamped into the grid.
    pub fn new(columns: usize, rows: usize, mut frames: Vec<WorldFrame>, start: FrameCoord) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        frames.resize_with(columns * rows, WorldFrame::new);
        let start = FrameCoord::new(start.column.min(columns - 1), start.row.min(rows - 1));
        Self {
            columns,
            rows,
            frames,
            start,
            current: start,
        }
    }

    /// The built-in 3x3 map with two planets per frame, starting in the center
    pub fn default_layout() -> Self {
        const SMALL: Vec2 = Vec2::new(0.2, 0.2);
        const LARGE: Vec2 = Vec2::new(0.25, 0.25);
        let frame = |a: (f32, f32), b: (f32, f32)| {
            WorldFrame::new()
                .with_planet(Planet::new(Vec2::new(a.0, a.1), SMALL))
                .with_planet(Planet::new(Vec2::new(b.0, b.1), LARGE))
        };

        let frames = vec![
            frame((0.2, 0.4), (-0.2, 0.4)),
            frame((-0.3, 0.4), (-0.2, -0.4)),
            frame((-0.2, -0.4), (0.4, 0.3)),
            frame((0.8, 0.2), (-0.2, 0.4)),
            frame((0.4, 0.4), (-0.4, -0.4)),
            frame((0.5, 0.4), (-0.1, -0.4)),
            frame((0.0, 0.0), (0.4, 0.4)),
            frame((0.2, 0.2), (-0.7, 0.1)),
            frame((0.2, 0.4), (-0.2, 0.4)),
        ];
        Self::new(3, 3, frames, FrameCoord::new(1, 1))
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Frame the map starts (and restarts) in
    pub fn start(&self) -> FrameCoord {
        self.start
    }

    /// Coordinate of the current frame
    pub fn current(&self) -> FrameCoord {
        self.current
    }

    /// The current frame
    pub fn current_frame(&self) -> &WorldFrame {
        &self.frames[self.index(self.current)]
    }

    /// Get a frame by coordinate
    pub fn frame(&self, coord: FrameCoord) -> Option<&WorldFrame> {
        if coord.column < self.columns && coord.row < self.rows {
            self.frames.get(self.index(coord))
        } else {
            None
        }
    }

    /// Iterate frames with their coordinates
    pub fn frames(&self) -> impl Iterator<Item = (FrameCoord, &WorldFrame)> + '_ {
        let columns = self.columns;
        self.frames
            .iter()
            .enumerate()
            .map(move |(i, f)| (FrameCoord::new(i % columns, i / columns), f))
    }

    /// Move to a frame directly; out-of-range coordinates are ignored
    pub fn set_current(&mut self, coord: FrameCoord) -> bool {
        if coord.column < self.columns && coord.row < self.rows {
            self.current = coord;
            true
        } else {
            false
        }
    }

    /// Return to the start frame
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    fn index(&self, coord: FrameCoord) -> usize {
        coord.row * self.columns + coord.column
    }

    /// Neighbor of `coord` across a single edge, if inside the map
    pub fn neighbor(&self, coord: FrameCoord, edge: FrameEdges) -> Option<FrameCoord> {
        let FrameCoord { column, row } = coord;
        if edge == FrameEdges::LEFT {
            column.checked_sub(1).map(|c| FrameCoord::new(c, row))
        } else if edge == FrameEdges::RIGHT {
            (column + 1 < self.columns).then(|| FrameCoord::new(column + 1, row))
        } else if edge == FrameEdges::BOTTOM {
            row.checked_sub(1).map(|r| FrameCoord::new(column, r))
        } else if edge == FrameEdges::TOP {
            (row + 1 < self.rows).then(|| FrameCoord::new(column, row + 1))
        } else {
            None
        }
    }

    /// Keep a position inside the world, switching frames at edges
    ///
    /// Returns the frame-local position and the edges crossed into a new
    /// frame. Positions pushed past the outer border are clamped to it.
    pub fn wrap(&mut self, position: Vec2) -> (Vec2, FrameEdges) {
        let mut p = position;
        let mut crossed = FrameEdges::empty();
        let span = 2.0 * FRAME_EXTENT;

        if p.x > FRAME_EXTENT {
            match self.neighbor(self.current, FrameEdges::RIGHT) {
                Some(n) => {
                    self.current = n;
                    p.x -= span;
                    crossed |= FrameEdges::RIGHT;
                }
                None => p.x = FRAME_EXTENT,
            }
        } else if p.x < -FRAME_EXTENT {
            match self.neighbor(self.current, FrameEdges::LEFT) {
                Some(n) => {
                    self.current = n;
                    p.x += span;
                    crossed |= FrameEdges::LEFT;
                }
                None => p.x = -FRAME_EXTENT,
            }
        }

        if p.y > FRAME_EXTENT {
            match self.neighbor(self.current, FrameEdges::TOP) {
                Some(n) => {
                    self.current = n;
                    p.y -= span;
                    crossed |= FrameEdges::TOP;
                }
                None => p.y = FRAME_EXTENT,
            }
        } else if p.y < -FRAME_EXTENT {
            match self.neighbor(self.current, FrameEdges::BOTTOM) {
                Some(n) => {
                    self.current = n;
                    p.y += span;
                    crossed |= FrameEdges::BOTTOM;
                }
                None => p.y = -FRAME_EXTENT,
            }
        }

        if !crossed.is_empty() {
            log::debug!("Entered frame {} via {:?}", self.current, crossed);
        }

        (p, crossed)
    }
}
