//! Preset pattern fills (`a:pattFill prst`).
//!
//! Each preset maps to a small recipe of repeating gradient layers drawn
//! over a base color inside one square tile. Recipes reference the pattern's
//! foreground and background colors symbolically; [`PatternFillEngine::build`]
//! substitutes the resolved colors.

use crate::common::Color;
use serde::Serialize;

/// All DrawingML preset patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternType {
    Pct5,
    Pct10,
    Pct20,
    Pct25,
    Pct30,
    Pct40,
    Pct50,
    Pct60,
    Pct70,
    Pct75,
    Pct80,
    Pct90,
    Horizontal,
    Vertical,
    LightHorizontal,
    LightVertical,
    DarkHorizontal,
    DarkVertical,
    NarrowHorizontal,
    NarrowVertical,
    DashedHorizontal,
    DashedVertical,
    DownDiagonal,
    UpDiagonal,
    LightDownDiagonal,
    LightUpDiagonal,
    DarkDownDiagonal,
    DarkUpDiagonal,
    WideDownDiagonal,
    WideUpDiagonal,
    DashedDownDiagonal,
    DashedUpDiagonal,
    Cross,
    DiagonalCross,
    SmallCheck,
    LargeCheck,
    SmallGrid,
    LargeGrid,
    DottedGrid,
    SmallConfetti,
    LargeConfetti,
    HorizontalBrick,
    DiagonalBrick,
    SolidDiamond,
    OpenDiamond,
    DottedDiamond,
    Plaid,
    Sphere,
    Weave,
    Divot,
    Shingle,
    Wave,
    Trellis,
    ZigZag,
}

impl PatternType {
    /// Parse a `prst` value.
    pub fn from_preset(preset: &str) -> Option<Self> {
        Some(match preset {
            "pct5" => Self::Pct5,
            "pct10" => Self::Pct10,
            "pct20" => Self::Pct20,
            "pct25" => Self::Pct25,
            "pct30" => Self::Pct30,
            "pct40" => Self::Pct40,
            "pct50" => Self::Pct50,
            "pct60" => Self::Pct60,
            "pct70" => Self::Pct70,
            "pct75" => Self::Pct75,
            "pct80" => Self::Pct80,
            "pct90" => Self::Pct90,
            "horz" => Self::Horizontal,
            "vert" => Self::Vertical,
            "ltHorz" => Self::LightHorizontal,
            "ltVert" => Self::LightVertical,
            "dkHorz" => Self::DarkHorizontal,
            "dkVert" => Self::DarkVertical,
            "narHorz" => Self::NarrowHorizontal,
            "narVert" => Self::NarrowVertical,
            "dashHorz" => Self::DashedHorizontal,
            "dashVert" => Self::DashedVertical,
            "dnDiag" => Self::DownDiagonal,
            "upDiag" => Self::UpDiagonal,
            "ltDnDiag" => Self::LightDownDiagonal,
            "ltUpDiag" => Self::LightUpDiagonal,
            "dkDnDiag" => Self::DarkDownDiagonal,
            "dkUpDiag" => Self::DarkUpDiagonal,
            "wdDnDiag" => Self::WideDownDiagonal,
            "wdUpDiag" => Self::WideUpDiagonal,
            "dashDnDiag" => Self::DashedDownDiagonal,
            "dashUpDiag" => Self::DashedUpDiagonal,
            "cross" => Self::Cross,
            "diagCross" => Self::DiagonalCross,
            "smCheck" => Self::SmallCheck,
            "lgCheck" => Self::LargeCheck,
            "smGrid" => Self::SmallGrid,
            "lgGrid" => Self::LargeGrid,
            "dotGrid" => Self::DottedGrid,
            "smConfetti" => Self::SmallConfetti,
            "lgConfetti" => Self::LargeConfetti,
            "horzBrick" => Self::HorizontalBrick,
            "diagBrick" => Self::DiagonalBrick,
            "solidDmnd" => Self::SolidDiamond,
            "openDmnd" => Self::OpenDiamond,
            "dotDmnd" => Self::DottedDiamond,
            "plaid" => Self::Plaid,
            "sphere" => Self::Sphere,
            "weave" => Self::Weave,
            "divot" => Self::Divot,
            "shingle" => Self::Shingle,
            "wave" => Self::Wave,
            "trellis" => Self::Trellis,
            "zigZag" => Self::ZigZag,
            _ => return None,
        })
    }
}

/// Color slot used by a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Fg,
    Bg,
    Clear,
}

#[derive(Debug, Clone, Copy)]
enum Geometry {
    /// Linear gradient at an angle in degrees (CSS convention, 0 = to top)
    Linear(f64),
    /// Circle centered in the tile
    Radial,
}

#[derive(Debug, Clone, Copy)]
struct LayerRecipe {
    geometry: Geometry,
    stops: &'static [(Paint, f64)],
    offset: (f64, f64),
}

impl LayerRecipe {
    const fn at(self, x: f64, y: f64) -> Self {
        Self {
            offset: (x, y),
            ..self
        }
    }
}

const fn lin(angle: f64, stops: &'static [(Paint, f64)]) -> LayerRecipe {
    LayerRecipe {
        geometry: Geometry::Linear(angle),
        stops,
        offset: (0.0, 0.0),
    }
}

const fn rad(stops: &'static [(Paint, f64)]) -> LayerRecipe {
    LayerRecipe {
        geometry: Geometry::Radial,
        stops,
        offset: (0.0, 0.0),
    }
}

struct Recipe {
    base: Paint,
    tile: f64,
    layers: &'static [LayerRecipe],
}

use Paint::{Bg, Clear, Fg};
use PatternType as P;

// Stop lists. Offsets are percent of the gradient line (radius for dots).
const DOT_10: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 10.0), (Clear, 10.0)];
const DOT_14: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 14.0), (Clear, 14.0)];
const DOT_20: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 20.0), (Clear, 20.0)];
const DOT_25: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 25.0), (Clear, 25.0)];
const DOT_30: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 30.0), (Clear, 30.0)];
const DOT_38: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 38.0), (Clear, 38.0)];
const HOLE_14: &[(Paint, f64)] = &[(Bg, 0.0), (Bg, 14.0), (Clear, 14.0)];
const HOLE_20: &[(Paint, f64)] = &[(Bg, 0.0), (Bg, 20.0), (Clear, 20.0)];
const HOLE_25: &[(Paint, f64)] = &[(Bg, 0.0), (Bg, 25.0), (Clear, 25.0)];
const HOLE_30: &[(Paint, f64)] = &[(Bg, 0.0), (Bg, 30.0), (Clear, 30.0)];
const HOLE_38: &[(Paint, f64)] = &[(Bg, 0.0), (Bg, 38.0), (Clear, 38.0)];

const BAND_12: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 12.5), (Clear, 12.5)];
const BAND_25: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 25.0), (Clear, 25.0)];
const BAND_34: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 34.0), (Clear, 34.0)];
const BAND_50: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 50.0), (Clear, 50.0)];

// Diagonals need two bands per tile so the stripes meet at tile edges.
const DIAG_12: &[(Paint, f64)] = &[
    (Fg, 0.0),
    (Fg, 12.5),
    (Clear, 12.5),
    (Clear, 50.0),
    (Fg, 50.0),
    (Fg, 62.5),
    (Clear, 62.5),
];
const DIAG_25: &[(Paint, f64)] = &[
    (Fg, 0.0),
    (Fg, 25.0),
    (Clear, 25.0),
    (Clear, 50.0),
    (Fg, 50.0),
    (Fg, 75.0),
    (Clear, 75.0),
];

const MASK_HALF: &[(Paint, f64)] = &[(Clear, 0.0), (Clear, 50.0), (Bg, 50.0)];
const CORNER: &[(Paint, f64)] = &[(Fg, 0.0), (Fg, 25.0), (Clear, 25.0)];
const CORNER_BG: &[(Paint, f64)] = &[(Bg, 0.0), (Bg, 25.0), (Clear, 25.0)];
const RING: &[(Paint, f64)] = &[(Clear, 0.0), (Clear, 40.0), (Fg, 40.0), (Fg, 55.0), (Clear, 55.0)];
const SPHERE: &[(Paint, f64)] = &[(Bg, 0.0), (Fg, 70.0), (Fg, 100.0)];

const TO_BOTTOM: f64 = 180.0;
const TO_RIGHT: f64 = 90.0;
const DOWN: f64 = 45.0;
const UP: f64 = -45.0;

const CHECKER: &[LayerRecipe] = &[
    lin(DOWN, CORNER),
    lin(UP, CORNER),
    lin(135.0, CORNER),
    lin(-135.0, CORNER),
];
const DIAMOND: &[LayerRecipe] = &[
    lin(DOWN, CORNER_BG),
    lin(UP, CORNER_BG),
    lin(135.0, CORNER_BG),
    lin(-135.0, CORNER_BG),
];

static RECIPES: &[(PatternType, Recipe)] = &[
    (P::Pct5, Recipe { base: Bg, tile: 8.0, layers: &[rad(DOT_10)] }),
    (P::Pct10, Recipe { base: Bg, tile: 6.0, layers: &[rad(DOT_14)] }),
    (P::Pct20, Recipe { base: Bg, tile: 4.0, layers: &[rad(DOT_20)] }),
    (P::Pct25, Recipe { base: Bg, tile: 4.0, layers: &[rad(DOT_25)] }),
    (P::Pct30, Recipe { base: Bg, tile: 4.0, layers: &[rad(DOT_30)] }),
    (P::Pct40, Recipe { base: Bg, tile: 4.0, layers: &[rad(DOT_38)] }),
    (P::Pct50, Recipe { base: Bg, tile: 2.0, layers: CHECKER }),
    (P::Pct60, Recipe { base: Fg, tile: 4.0, layers: &[rad(HOLE_38)] }),
    (P::Pct70, Recipe { base: Fg, tile: 4.0, layers: &[rad(HOLE_30)] }),
    (P::Pct75, Recipe { base: Fg, tile: 4.0, layers: &[rad(HOLE_25)] }),
    (P::Pct80, Recipe { base: Fg, tile: 4.0, layers: &[rad(HOLE_20)] }),
    (P::Pct90, Recipe { base: Fg, tile: 6.0, layers: &[rad(HOLE_14)] }),
    (P::Horizontal, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, BAND_25)] }),
    (P::Vertical, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_RIGHT, BAND_25)] }),
    (P::LightHorizontal, Recipe { base: Bg, tile: 4.0, layers: &[lin(TO_BOTTOM, BAND_25)] }),
    (P::LightVertical, Recipe { base: Bg, tile: 4.0, layers: &[lin(TO_RIGHT, BAND_25)] }),
    (P::DarkHorizontal, Recipe { base: Bg, tile: 4.0, layers: &[lin(TO_BOTTOM, BAND_50)] }),
    (P::DarkVertical, Recipe { base: Bg, tile: 4.0, layers: &[lin(TO_RIGHT, BAND_50)] }),
    (P::NarrowHorizontal, Recipe { base: Bg, tile: 3.0, layers: &[lin(TO_BOTTOM, BAND_34)] }),
    (P::NarrowVertical, Recipe { base: Bg, tile: 3.0, layers: &[lin(TO_RIGHT, BAND_34)] }),
    (P::DashedHorizontal, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_RIGHT, MASK_HALF), lin(TO_BOTTOM, BAND_12)] }),
    (P::DashedVertical, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, MASK_HALF), lin(TO_RIGHT, BAND_12)] }),
    (P::DownDiagonal, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_12)] }),
    (P::UpDiagonal, Recipe { base: Bg, tile: 8.0, layers: &[lin(UP, DIAG_12)] }),
    (P::LightDownDiagonal, Recipe { base: Bg, tile: 4.0, layers: &[lin(DOWN, DIAG_12)] }),
    (P::LightUpDiagonal, Recipe { base: Bg, tile: 4.0, layers: &[lin(UP, DIAG_12)] }),
    (P::DarkDownDiagonal, Recipe { base: Bg, tile: 4.0, layers: &[lin(DOWN, DIAG_25)] }),
    (P::DarkUpDiagonal, Recipe { base: Bg, tile: 4.0, layers: &[lin(UP, DIAG_25)] }),
    (P::WideDownDiagonal, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_25)] }),
    (P::WideUpDiagonal, Recipe { base: Bg, tile: 8.0, layers: &[lin(UP, DIAG_25)] }),
    (P::DashedDownDiagonal, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, MASK_HALF), lin(DOWN, DIAG_12)] }),
    (P::DashedUpDiagonal, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, MASK_HALF), lin(UP, DIAG_12)] }),
    (P::Cross, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, BAND_12), lin(TO_RIGHT, BAND_12)] }),
    (P::DiagonalCross, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_12), lin(UP, DIAG_12)] }),
    (P::SmallCheck, Recipe { base: Bg, tile: 4.0, layers: CHECKER }),
    (P::LargeCheck, Recipe { base: Bg, tile: 8.0, layers: CHECKER }),
    (P::SmallGrid, Recipe { base: Bg, tile: 4.0, layers: &[lin(TO_BOTTOM, BAND_25), lin(TO_RIGHT, BAND_25)] }),
    (P::LargeGrid, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, BAND_12), lin(TO_RIGHT, BAND_12)] }),
    (P::DottedGrid, Recipe { base: Bg, tile: 4.0, layers: &[rad(DOT_20), rad(DOT_10).at(2.0, 0.0), rad(DOT_10).at(0.0, 2.0)] }),
    (P::SmallConfetti, Recipe { base: Bg, tile: 8.0, layers: &[rad(DOT_10), rad(DOT_10).at(4.0, 2.0), rad(DOT_10).at(2.0, 5.0)] }),
    (P::LargeConfetti, Recipe { base: Bg, tile: 12.0, layers: &[rad(DOT_14), rad(DOT_14).at(6.0, 3.0), rad(DOT_14).at(3.0, 8.0)] }),
    (P::HorizontalBrick, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, BAND_12), lin(TO_RIGHT, BAND_12).at(4.0, 4.0)] }),
    (P::DiagonalBrick, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_12), lin(UP, BAND_12).at(4.0, 4.0)] }),
    (P::SolidDiamond, Recipe { base: Fg, tile: 8.0, layers: DIAMOND }),
    (P::OpenDiamond, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_12), lin(UP, DIAG_12).at(4.0, 0.0)] }),
    (P::DottedDiamond, Recipe { base: Bg, tile: 8.0, layers: &[rad(DOT_14), rad(DOT_14).at(4.0, 4.0)] }),
    (P::Plaid, Recipe { base: Bg, tile: 8.0, layers: &[lin(TO_BOTTOM, BAND_50), lin(TO_RIGHT, BAND_25)] }),
    (P::Sphere, Recipe { base: Fg, tile: 8.0, layers: &[rad(SPHERE)] }),
    (P::Weave, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_25), lin(UP, DIAG_12).at(4.0, 0.0)] }),
    (P::Divot, Recipe { base: Bg, tile: 8.0, layers: &[rad(DOT_14).at(2.0, 2.0), rad(DOT_14).at(6.0, 6.0)] }),
    (P::Shingle, Recipe { base: Bg, tile: 8.0, layers: &[lin(DOWN, DIAG_12), lin(TO_BOTTOM, BAND_12)] }),
    (P::Wave, Recipe { base: Bg, tile: 8.0, layers: &[rad(RING)] }),
    (P::Trellis, Recipe { base: Bg, tile: 4.0, layers: &[lin(DOWN, DIAG_25), lin(UP, DIAG_25)] }),
    (P::ZigZag, Recipe { base: Bg, tile: 8.0, layers: &[lin(135.0, CORNER), lin(DOWN, CORNER).at(4.0, 0.0)] }),
];

fn recipe(pattern: PatternType) -> Option<&'static Recipe> {
    RECIPES.iter().find(|(p, _)| *p == pattern).map(|(_, r)| r)
}

/// Geometry of one generated layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LayerShape {
    /// Repeating linear gradient, angle in degrees
    Linear { angle: f64 },
    /// Repeating circle centered in the tile
    Radial,
}

/// A color stop of a layer. `color: None` is transparent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerStop {
    pub color: Option<Color>,
    /// Percent along the gradient line
    pub offset: f64,
}

/// One gradient layer of a tiled pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientLayer {
    pub shape: LayerShape,
    pub stops: Vec<LayerStop>,
}

/// Everything a renderer needs to paint a preset pattern.
///
/// Layers are listed top first. `tile_position` holds one offset per layer.
/// An unknown preset yields the empty descriptor (no base, no layers).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TiledPatternDescriptor {
    pub base: Option<Color>,
    pub layers: Vec<GradientLayer>,
    /// Tile edge in pixels
    pub tile_size: f64,
    pub tile_position: Vec<(f64, f64)>,
}

impl TiledPatternDescriptor {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.base.is_none()
    }
}

/// The preset pattern table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternFillEngine;

impl PatternFillEngine {
    pub fn build(preset: &str, fg: Color, bg: Color) -> TiledPatternDescriptor {
        let Some(pattern) = PatternType::from_preset(preset) else {
            tracing::debug!(preset, "unknown preset pattern");
            return TiledPatternDescriptor::default();
        };
        Self::build_type(pattern, fg, bg)
    }

    pub fn build_type(pattern: PatternType, fg: Color, bg: Color) -> TiledPatternDescriptor {
        let paint = |p: Paint| match p {
            Paint::Fg => Some(fg),
            Paint::Bg => Some(bg),
            Paint::Clear => None,
        };
        let Some(recipe) = recipe(pattern) else {
            return TiledPatternDescriptor::default();
        };
        let layers = recipe
            .layers
            .iter()
            .map(|layer| GradientLayer {
                shape: match layer.geometry {
                    Geometry::Linear(angle) => LayerShape::Linear { angle },
                    Geometry::Radial => LayerShape::Radial,
                },
                stops: layer
                    .stops
                    .iter()
                    .map(|&(p, offset)| LayerStop { color: paint(p), offset })
                    .collect(),
            })
            .collect();

        TiledPatternDescriptor {
            base: paint(recipe.base),
            layers,
            tile_size: recipe.tile,
            tile_position: recipe.layers.iter().map(|l| l.offset).collect(),
        }
    }
}
