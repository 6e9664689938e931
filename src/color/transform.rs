//! The color transform pipeline.
//!
//! A [`ColorSpec`] is resolved in two steps: find the base color, then apply
//! the modifiers in a fixed order (alpha, hueMod, lumMod, lumOff, satMod,
//! shade, tint). The HSL modifiers all work on one floating point HSL value,
//! which is converted back to 8-bit RGB only once at the end.

use super::preset::{preset_color, system_color};
use super::scheme::SchemeColorResolver;
use super::spec::{ColorKind, ColorModifiers, ColorSpec};
use crate::common::{Color, Hsl};
use crate::context::{ColorMap, StyleContext};
use crate::tree::Node;

/// Pure modifier functions over HSL values.
pub mod ops {
    use crate::common::Hsl;

    /// Multiply the hue, wrapping into `[0, 360)`.
    pub fn hue_mod(c: Hsl, factor: f64) -> Hsl {
        let mut h = (c.h * factor).rem_euclid(360.0);
        if h >= 360.0 {
            h = 0.0;
        }
        Hsl { h, ..c }
    }

    pub fn lum_mod(c: Hsl, factor: f64) -> Hsl {
        Hsl {
            l: (c.l * factor).clamp(0.0, 1.0),
            ..c
        }
    }

    pub fn lum_off(c: Hsl, offset: f64) -> Hsl {
        Hsl {
            l: (c.l + offset).clamp(0.0, 1.0),
            ..c
        }
    }

    pub fn sat_mod(c: Hsl, factor: f64) -> Hsl {
        Hsl {
            s: (c.s * factor).clamp(0.0, 1.0),
            ..c
        }
    }

    /// Darken toward black: `l * factor`.
    pub fn shade(c: Hsl, factor: f64) -> Hsl {
        Hsl {
            l: (c.l * factor).clamp(0.0, 1.0),
            ..c
        }
    }

    /// Lighten toward white: `l * factor + (1 - factor)`.
    pub fn tint(c: Hsl, factor: f64) -> Hsl {
        Hsl {
            l: (c.l * factor + (1.0 - factor)).clamp(0.0, 1.0),
            ..c
        }
    }
}

/// Apply `modifiers` to an HSL value in pipeline order. Alpha is not touched.
pub fn apply_hsl_modifiers(mut c: Hsl, modifiers: &ColorModifiers) -> Hsl {
    if let Some(f) = modifiers.hue_mod {
        c = ops::hue_mod(c, f);
    }
    if let Some(f) = modifiers.lum_mod {
        c = ops::lum_mod(c, f);
    }
    if let Some(f) = modifiers.lum_off {
        c = ops::lum_off(c, f);
    }
    if let Some(f) = modifiers.sat_mod {
        c = ops::sat_mod(c, f);
    }
    if let Some(f) = modifiers.shade {
        c = ops::shade(c, f);
    }
    if let Some(f) = modifiers.tint {
        c = ops::tint(c, f);
    }
    c
}

/// Base color before modifiers. HSL bases stay in HSL so that an `hslClr`
/// with modifiers never passes through 8-bit RGB twice.
#[derive(Debug, Clone, Copy)]
enum Base {
    Rgb(Color),
    Hsl(Hsl),
}

fn finish(base: Base, modifiers: &ColorModifiers) -> Color {
    let (rgb, alpha) = match base {
        Base::Rgb(color) if !modifiers.touches_hsl() => (color.rgb, color.alpha),
        Base::Rgb(color) => (apply_hsl_modifiers(color.rgb.to_hsl(), modifiers).to_rgb(), color.alpha),
        Base::Hsl(hsl) => (apply_hsl_modifiers(hsl, modifiers).to_rgb(), None),
    };
    match modifiers.alpha.or(alpha) {
        Some(a) => Color::with_alpha(rgb, a),
        None => Color::opaque(rgb),
    }
}

/// Apply modifiers to an already resolved color.
pub fn apply_modifiers(base: Color, modifiers: &ColorModifiers) -> Color {
    finish(Base::Rgb(base), modifiers)
}

/// Resolves color specifications against one slide context.
#[derive(Debug, Clone, Copy)]
pub struct ColorTransformPipeline<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    color_map: Option<&'c ColorMap>,
}

impl<'c, 'a> ColorTransformPipeline<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self { ctx, color_map: None }
    }

    /// Use `map` instead of the context's effective color map.
    pub fn with_color_map(mut self, map: &'c ColorMap) -> Self {
        self.color_map = Some(map);
        self
    }

    pub fn resolve(&self, spec: &ColorSpec) -> Option<Color> {
        self.resolve_with(spec, None)
    }

    /// Resolve `spec`, substituting `placeholder` for `phClr`.
    pub fn resolve_with(&self, spec: &ColorSpec, placeholder: Option<&ColorSpec>) -> Option<Color> {
        self.resolve_at(spec, placeholder, 0)
    }

    /// Resolve the color element inside `container` (`solidFill`, `buClr`,
    /// `fgClr`, ...) or `container` itself when it is a color element.
    pub fn resolve_node(&self, container: &Node, placeholder: Option<&ColorSpec>) -> Option<Color> {
        let spec = ColorSpec::from_node(container).or_else(|| ColorSpec::from_container(container))?;
        self.resolve_with(&spec, placeholder)
    }

    fn resolve_at(&self, spec: &ColorSpec, placeholder: Option<&ColorSpec>, depth: usize) -> Option<Color> {
        if depth > self.ctx.options().max_recursion_depth {
            tracing::debug!(depth, "color resolution depth cap reached");
            return None;
        }

        let base = match &spec.kind {
            ColorKind::Rgb(rgb) => Base::Rgb(Color::opaque(*rgb)),
            ColorKind::Hsl(hsl) => Base::Hsl(*hsl),
            ColorKind::Scheme(slot) => {
                let target = SchemeColorResolver::new(self.ctx).resolve(slot, self.color_map, placeholder)?;
                // The placeholder color itself is resolved without a placeholder.
                Base::Rgb(self.resolve_at(&target, None, depth + 1)?)
            },
            ColorKind::System { name, last } => {
                let rgb = last.or_else(|| system_color(name));
                if rgb.is_none() {
                    tracing::debug!(name = name.as_str(), "unknown system color");
                }
                Base::Rgb(Color::opaque(rgb?))
            },
            ColorKind::Preset(name) => {
                let rgb = preset_color(name);
                if rgb.is_none() {
                    tracing::debug!(name = name.as_str(), "unknown preset color");
                }
                Base::Rgb(Color::opaque(rgb?))
            },
        };

        Some(finish(base, &spec.modifiers))
    }
}
