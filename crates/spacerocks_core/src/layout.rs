//! World layout serialization and validation
//!
//! A [`WorldLayout`] describes the grid of frames and the planets in each one.
//! Layouts are loaded from and saved to RON files, checked with
//! [`LayoutValidator`], and turned into a physics [`WorldMap`] with
//! [`WorldLayout::to_world_map`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use spacerocks_math::Vec2;
use spacerocks_physics::orbital::{DEFAULT_GRAVITY_REACH, DEFAULT_GRAVITY_STRENGTH};
use spacerocks_physics::{FrameCoord, Planet, WorldFrame, WorldMap, FRAME_EXTENT};

/// Gravity strengths beyond this are rejected by the validator
const MAX_REASONABLE_GRAVITY: f32 = 0.1;

/// A planet as stored in a layout file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetTemplate {
    /// Center in frame-local coordinates
    pub position: [f32; 2],
    /// Sprite half-extents; `scale[0]` is the collision radius
    pub scale: [f32; 2],
    #[serde(default)]
    pub gravity_strength: Option<f32>,
    #[serde(default)]
    pub gravity_reach: Option<f32>,
}

impl PlanetTemplate {
    /// Create a round planet with default gravity
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: [x, y],
            scale: [radius, radius],
            gravity_strength: None,
            gravity_reach: None,
        }
    }

    /// Builder: override gravity
    pub fn with_gravity(mut self, strength: f32, reach: f32) -> Self {
        self.gravity_strength = Some(strength);
        self.gravity_reach = Some(reach);
        self
    }

    /// Build the physics planet
    pub fn to_planet(&self) -> Planet {
        Planet::new(Vec2::from(self.position), Vec2::from(self.scale)).with_gravity(
            self.gravity_strength.unwrap_or(DEFAULT_GRAVITY_STRENGTH),
            self.gravity_reach.unwrap_or(DEFAULT_GRAVITY_REACH),
        )
    }

    /// Template for an existing planet; default gravity is left implicit
    pub fn from_planet(planet: &Planet) -> Self {
        let explicit = |value: f32, default: f32| (value != default).then_some(value);
        Self {
            position: planet.position.to_array(),
            scale: planet.scale.to_array(),
            gravity_strength: explicit(planet.gravity_strength, DEFAULT_GRAVITY_STRENGTH),
            gravity_reach: explicit(planet.gravity_reach, DEFAULT_GRAVITY_REACH),
        }
    }
}

/// The planets of one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTemplate {
    pub planets: Vec<PlanetTemplate>,
}

impl FrameTemplate {
    pub fn new(planets: Vec<PlanetTemplate>) -> Self {
        Self { planets }
    }

    pub fn to_frame(&self) -> WorldFrame {
        self.planets
            .iter()
            .fold(WorldFrame::new(), |frame, p| frame.with_planet(p.to_planet()))
    }
}

/// A serializable description of the world
///
/// Frames are listed row-major with the bottom row first, so frame `i` sits
/// at column `i % columns`, row `i / columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Layout name (for display/debugging)
    pub name: String,
    pub columns: usize,
    pub rows: usize,
    /// Starting frame as `[column, row]`; defaults to the center frame
    #[serde(default)]
    pub start: Option<[usize; 2]>,
    pub frames: Vec<FrameTemplate>,
}

impl Default for WorldLayout {
    /// The built-in 3x3 world
    fn default() -> Self {
        Self::from_world_map("Space Rocks", &WorldMap::default_layout())
    }
}

impl WorldLayout {
    /// Create a layout of empty frames
    pub fn new(name: impl Into<String>, columns: usize, rows: usize) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
            start: None,
            frames: vec![FrameTemplate::default(); columns * rows],
        }
    }

    /// Builder: set the start frame
    pub fn with_start(mut self, column: usize, row: usize) -> Self {
        self.start = Some([column, row]);
        self
    }

    /// Capture an existing map
    pub fn from_world_map(name: impl Into<String>, map: &WorldMap) -> Self {
        let frames = map
            .frames()
            .map(|(_, frame)| FrameTemplate::new(frame.planets().iter().map(PlanetTemplate::from_planet).collect()))
            .collect();
        Self {
            name: name.into(),
            columns: map.columns(),
            rows: map.rows(),
            start: Some([map.start().column, map.start().row]),
            frames,
        }
    }

    /// Mutable access to the frame at `(column, row)`
    pub fn frame_mut(&mut self, column: usize, row: usize) -> Option<&mut FrameTemplate> {
        if column < self.columns && row < self.rows {
            self.frames.get_mut(row * self.columns + column)
        } else {
            None
        }
    }

    /// The start frame, falling back to the center of the grid
    pub fn start_coord(&self) -> FrameCoord {
        match self.start {
            Some([column, row]) => FrameCoord::new(column, row),
            None => FrameCoord::new(self.columns / 2, self.rows / 2),
        }
    }

    /// Build the physics world map
    pub fn to_world_map(&self) -> WorldMap {
        let frames = self.frames.iter().map(FrameTemplate::to_frame).collect();
        WorldMap::new(self.columns, self.rows, frames, self.start_coord())
    }

    /// Load a layout from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LayoutLoadError> {
        let contents = fs::read_to_string(path)?;
        let layout = ron::from_str(&contents)?;
        Ok(layout)
    }

    /// Save a layout to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LayoutSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load and validate a layout, falling back to the built-in one
    ///
    /// Every problem is logged as a warning.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(layout) => match LayoutValidator::validate_or_error(&layout) {
                Ok(()) => {
                    log::info!(
                        "Loaded layout '{}' ({}x{}) from {}",
                        layout.name,
                        layout.columns,
                        layout.rows,
                        path.display()
                    );
                    layout
                }
                Err(errors) => {
                    for e in &errors {
                        log::warn!("Layout {}: {}", path.display(), e);
                    }
                    log::warn!("Using built-in layout");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to load layout {}: {}. Using built-in layout", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Error loading a layout
#[derive(Debug)]
pub enum LayoutLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for LayoutLoadError {
    fn from(e: io::Error) -> Self {
        LayoutLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LayoutLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LayoutLoadError::Parse(e)
    }
}

impl std::fmt::Display for LayoutLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutLoadError::Io(e) => write!(f, "IO error: {}", e),
            LayoutLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LayoutLoadError {}

/// Error saving a layout
#[derive(Debug)]
pub enum LayoutSaveError {
    Io(io::Error),
    Serialize(ron::Error),
}

impl From<io::Error> for LayoutSaveError {
    fn from(e: io::Error) -> Self {
        LayoutSaveError::Io(e)
    }
}

impl From<ron::Error> for LayoutSaveError {
    fn from(e: ron::Error) -> Self {
        LayoutSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LayoutSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutSaveError::Io(e) => write!(f, "IO error: {}", e),
            LayoutSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LayoutSaveError {}

/// Problem found in a layout
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Zero columns or rows
    EmptyGrid,
    /// `frames.len()` differs from `columns * rows`
    FrameCountMismatch { expected: usize, found: usize },
    /// Start frame lies outside the grid
    StartOutsideGrid([usize; 2]),
    /// Planet center outside `[-1, 1]`
    PlanetOutsideFrame { frame: usize, planet: usize, position: [f32; 2] },
    /// Zero or negative sprite scale
    NonPositiveScale { frame: usize, planet: usize },
    /// Zero or negative gravity reach
    NonPositiveReach { frame: usize, planet: usize },
    /// Gravity strength negative or above 0.1
    UnreasonableGravity { frame: usize, planet: usize, strength: f32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyGrid => write!(f, "Layout has no frames"),
            ValidationError::FrameCountMismatch { expected, found } => {
                write!(f, "Expected {} frames, found {}", expected, found)
            }
            ValidationError::StartOutsideGrid([c, r]) => {
                write!(f, "Start frame ({}, {}) is outside the grid", c, r)
            }
            ValidationError::PlanetOutsideFrame { frame, planet, position } => write!(
                f,
                "Planet {} in frame {} is outside the frame: [{}, {}]",
                planet, frame, position[0], position[1]
            ),
            ValidationError::NonPositiveScale { frame, planet } => {
                write!(f, "Planet {} in frame {} has a non-positive scale", planet, frame)
            }
            ValidationError::NonPositiveReach { frame, planet } => {
                write!(f, "Planet {} in frame {} has a non-positive gravity reach", planet, frame)
            }
            ValidationError::UnreasonableGravity { frame, planet, strength } => write!(
                f,
                "Planet {} in frame {} has unreasonable gravity strength {}",
                planet, frame, strength
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Static checks on a [`WorldLayout`]
pub struct LayoutValidator;

impl LayoutValidator {
    /// Validate a layout, returning all errors found
    pub fn validate(layout: &WorldLayout) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if layout.columns == 0 || layout.rows == 0 {
            errors.push(ValidationError::EmptyGrid);
        }

        let expected = layout.columns * layout.rows;
        if layout.frames.len() != expected {
            errors.push(ValidationError::FrameCountMismatch {
                expected,
                found: layout.frames.len(),
            });
        }

        if let Some([column, row]) = layout.start {
            if column >= layout.columns || row >= layout.rows {
                errors.push(ValidationError::StartOutsideGrid([column, row]));
            }
        }

        for (frame, template) in layout.frames.iter().enumerate() {
            for (planet, p) in template.planets.iter().enumerate() {
                if p.position.iter().any(|c| c.abs() > FRAME_EXTENT) {
                    errors.push(ValidationError::PlanetOutsideFrame {
                        frame,
                        planet,
                        position: p.position,
                    });
                }
                if p.scale.iter().any(|&s| s <= 0.0) {
                    errors.push(ValidationError::NonPositiveScale { frame, planet });
                }
                if p.gravity_reach.is_some_and(|r| r <= 0.0) {
                    errors.push(ValidationError::NonPositiveReach { frame, planet });
                }
                if let Some(strength) = p.gravity_strength {
                    if !(0.0..=MAX_REASONABLE_GRAVITY).contains(&strength) {
                        errors.push(ValidationError::UnreasonableGravity {
                            frame,
                            planet,
                            strength,
                        });
                    }
                }
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(layout: &WorldLayout) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(layout);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_world_map() {
        let layout = WorldLayout::default();
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.frames.len(), 9);
        assert_eq!(layout.to_world_map(), WorldMap::default_layout());
    }

    #[test]
    fn test_default_layout_is_valid() {
        let errors = LayoutValidator::validate(&WorldLayout::default());
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_ron_round_trip() {
        let layout = WorldLayout::default();
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let serialized = ron::ser::to_string_pretty(&layout, pretty).unwrap();
        assert!(serialized.contains("Space Rocks"));

        let parsed: WorldLayout = ron::from_str(&serialized).unwrap();
        assert_eq!(parsed, layout);
    }

    #[test]
    fn test_parse_hand_written_layout() {
        let text = r#"
            WorldLayout(
                name: "Tiny",
                columns: 2,
                rows: 1,
                frames: [
                    (planets: [(position: (0.5, 0.0), scale: (0.2, 0.2))]),
                    (planets: [(position: (0.0, 0.0), scale: (0.1, 0.1), gravity_strength: Some(0.001))]),
                ],
            )
        "#;
        let layout: WorldLayout = ron::from_str(text).unwrap();
        assert_eq!(layout.start, None);
        assert_eq!(layout.start_coord(), FrameCoord::new(1, 0));

        let map = layout.to_world_map();
        let planet = map.frame(FrameCoord::new(1, 0)).unwrap().planets()[0];
        assert_eq!(planet.gravity_strength, 0.001);
        assert_eq!(planet.gravity_reach, DEFAULT_GRAVITY_REACH);
    }

    #[test]
    fn test_frame_count_mismatch() {
        let mut layout = WorldLayout::new("Short", 2, 2);
        layout.frames.pop();
        let errors = LayoutValidator::validate(&layout);
        assert!(errors.contains(&ValidationError::FrameCountMismatch { expected: 4, found: 3 }));
    }

    #[test]
    fn test_planet_findings() {
        let mut layout = WorldLayout::new("Bad", 1, 1);
        layout.frames[0].planets = vec![
            PlanetTemplate::new(1.5, 0.0, 0.2),
            PlanetTemplate::new(0.0, 0.0, 0.0),
            PlanetTemplate::new(0.0, 0.0, 0.1).with_gravity(5.0, -1.0),
        ];
        let errors = LayoutValidator::validate(&layout);
        assert!(errors.contains(&ValidationError::PlanetOutsideFrame {
            frame: 0,
            planet: 0,
            position: [1.5, 0.0]
        }));
        assert!(errors.contains(&ValidationError::NonPositiveScale { frame: 0, planet: 1 }));
        assert!(errors.contains(&ValidationError::NonPositiveReach { frame: 0, planet: 2 }));
        assert!(errors.contains(&ValidationError::UnreasonableGravity {
            frame: 0,
            planet: 2,
            strength: 5.0
        }));
    }

    #[test]
    fn test_start_outside_grid() {
        let layout = WorldLayout::new("Start", 2, 2).with_start(2, 0);
        assert!(LayoutValidator::validate_or_error(&layout).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = WorldLayout::load("/nonexistent/path/layout.ron");
        assert!(matches!(result, Err(LayoutLoadError::Io(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let layout = WorldLayout::load_or_default("/nonexistent/path/layout.ron");
        assert_eq!(layout, WorldLayout::default());
    }

    #[test]
    fn test_frame_mut() {
        let mut layout = WorldLayout::new("Edit", 2, 2);
        layout
            .frame_mut(1, 1)
            .unwrap()
            .planets
            .push(PlanetTemplate::new(0.0, 0.0, 0.1));
        assert_eq!(layout.frames[3].planets.len(), 1);
        assert!(layout.frame_mut(2, 0).is_none());
    }
}
