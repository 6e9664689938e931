//! Gradient fills (`a:gradFill`).

use crate::color::{ColorSpec, ColorTransformPipeline};
use crate::common::Color;
use crate::common::unit::angle_to_degrees;
use crate::tree::Node;
use serde::Serialize;

/// Offset added to `lin ang` for shape gradients.
pub const SHAPE_GRADIENT_AXIS_OFFSET: f64 = 0.0;
/// Offset added to `lin ang` for slide background gradients, whose zero
/// direction points along the other axis.
pub const BACKGROUND_GRADIENT_AXIS_OFFSET: f64 = 90.0;

/// Shape of a `path` gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathShape {
    Circle,
    Rect,
    Shape,
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradientKind {
    Linear { scaled: bool },
    Path(PathShape),
}

/// One color stop, position in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

/// A resolved gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientFill {
    pub kind: GradientKind,
    /// Rotation in whole degrees, `[0, 360)`, axis offset included
    pub angle: f64,
    /// Sorted ascending by position
    pub stops: Vec<GradientStop>,
    pub rot_with_shape: bool,
}

/// Builds [`GradientFill`]s from `gradFill` elements.
#[derive(Debug, Clone, Copy)]
pub struct GradientEngine<'c, 'a> {
    pipeline: ColorTransformPipeline<'c, 'a>,
}

impl<'c, 'a> GradientEngine<'c, 'a> {
    pub fn new(pipeline: ColorTransformPipeline<'c, 'a>) -> Self {
        Self { pipeline }
    }

    /// Build a gradient. Stops whose color does not resolve are dropped; a
    /// gradient without any usable stop yields `None`.
    pub fn build(&self, grad: &Node, placeholder: Option<&ColorSpec>, axis_offset: f64) -> Option<GradientFill> {
        let mut stops: Vec<GradientStop> = grad
            .child("gsLst")
            .map(|list| {
                list.children_named("gs")
                    .filter_map(|gs| {
                        let position = gs.attr_f64("pos")? / 1000.0;
                        let color = self.pipeline.resolve_node(gs, placeholder)?;
                        Some(GradientStop { position, color })
                    })
                    .collect()
            })
            .unwrap_or_default();

        if stops.is_empty() {
            tracing::debug!("gradient without usable stops");
            return None;
        }
        sort_stops(&mut stops);

        let (kind, raw_angle) = match grad.child("path") {
            Some(path) => {
                let shape = match path.attr("path") {
                    Some("circle") => PathShape::Circle,
                    Some("rect") => PathShape::Rect,
                    _ => PathShape::Shape,
                };
                (GradientKind::Path(shape), 0)
            },
            None => {
                let lin = grad.child("lin");
                let scaled = lin.is_some_and(|l| l.flag("scaled"));
                let ang = lin.and_then(|l| l.attr_i64("ang")).unwrap_or(0);
                (GradientKind::Linear { scaled }, ang)
            },
        };

        Some(GradientFill {
            kind,
            angle: (angle_to_degrees(raw_angle) + axis_offset).rem_euclid(360.0),
            stops,
            rot_with_shape: grad.flag("rotWithShape"),
        })
    }
}

/// Stable ascending sort by position.
pub fn sort_stops(stops: &mut [GradientStop]) {
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::context::StyleContext;
    use proptest::prelude::*;

    fn stop(pos: &str, hex: &str) -> Node {
        Node::new("gs")
            .with_attr("pos", pos)
            .with_child(Node::new("srgbClr").with_attr("val", hex))
    }

    #[test]
    fn test_stops_sorted_and_angle() {
        let grad = Node::new("gradFill")
            .with_attr("rotWithShape", "1")
            .with_child(
                Node::new("gsLst")
                    .with_child(stop("100000", "0000FF"))
                    .with_child(stop("0", "FF0000"))
                    .with_child(stop("50000", "00FF00")),
            )
            .with_child(Node::new("lin").with_attr("ang", "5400000").with_attr("scaled", "0"));
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).build();
        let engine = GradientEngine::new(ColorTransformPipeline::new(&ctx));

        let shape = engine.build(&grad, None, SHAPE_GRADIENT_AXIS_OFFSET).unwrap();
        let positions: Vec<f64> = shape.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 50.0, 100.0]);
        assert_eq!(shape.stops[0].color.rgb, RGBColor::new(255, 0, 0));
        assert_eq!(shape.angle, 90.0);
        assert!(shape.rot_with_shape);
        assert_eq!(shape.kind, GradientKind::Linear { scaled: false });

        let background = engine.build(&grad, None, BACKGROUND_GRADIENT_AXIS_OFFSET).unwrap();
        assert_eq!(background.angle, 180.0);
    }

    #[test]
    fn test_path_gradient_and_empty() {
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).build();
        let engine = GradientEngine::new(ColorTransformPipeline::new(&ctx));

        let radial = Node::new("gradFill")
            .with_child(Node::new("gsLst").with_child(stop("0", "FFFFFF")))
            .with_child(Node::new("path").with_attr("path", "circle"));
        let fill = engine.build(&radial, None, SHAPE_GRADIENT_AXIS_OFFSET).unwrap();
        assert_eq!(fill.kind, GradientKind::Path(PathShape::Circle));

        let empty = Node::new("gradFill").with_child(Node::new("gsLst").with_child(stop("0", "nothex")));
        assert!(engine.build(&empty, None, SHAPE_GRADIENT_AXIS_OFFSET).is_none());
    }

    proptest! {
        #[test]
        fn prop_stops_come_out_sorted(positions in prop::collection::vec(0u32..=100_000, 1..12)) {
            let mut stops: Vec<GradientStop> = positions
                .iter()
                .map(|&p| GradientStop { position: f64::from(p) / 1000.0, color: Color::opaque(RGBColor::BLACK) })
                .collect();
            sort_stops(&mut stops);
            prop_assert!(stops.windows(2).all(|w| w[0].position <= w[1].position));
            prop_assert_eq!(stops.len(), positions.len());
        }
    }
}
