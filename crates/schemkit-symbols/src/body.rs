//! Symbol body geometry and stroke-path helpers.

use lyon::geom::ArcFlags;
use lyon::math::point;
use lyon::path::builder::SvgPathBuilder;
use lyon::path::Path;

use schemkit_core::{BoundingBox, Point, SymbolConfig, Vec3};

/// Where a terminal attaches to a symbol, in the symbol's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSpec {
    /// Attachment point on the symbol body.
    pub position: Point,
    /// Exit direction, away from the body. Unit length by construction of
    /// the builders in this crate.
    pub direction: Vec3,
}

/// A circular dot, drawn filled (solder blob) or open (background-filled
/// contact circle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f64,
    pub filled: bool,
}

/// Built geometry of a symbol in its local frame.
#[derive(Debug, Clone)]
pub struct SymbolBody {
    /// Stroked outline paths, drawn at the component stroke width.
    pub strokes: Vec<Path>,
    /// Contact circles and solder blobs, drawn at the wire stroke width.
    pub dots: Vec<Dot>,
    /// Terminal attachment specs.
    pub terminals: Vec<TerminalSpec>,
    /// Bounding box of strokes and dots.
    pub bounds: BoundingBox,
}

impl SymbolBody {
    /// Assemble a body, deriving the bounding box from the geometry. Bodies
    /// with no geometry at all get a degenerate box at the origin.
    pub fn new(strokes: Vec<Path>, dots: Vec<Dot>, terminals: Vec<TerminalSpec>) -> Self {
        let mut bounds: Option<BoundingBox> = None;
        let mut extend = |bb: BoundingBox| {
            bounds = Some(match bounds {
                Some(existing) => existing.union(bb),
                None => bb,
            });
        };

        for stroke in &strokes {
            let aabb = lyon::algorithms::aabb::bounding_box(stroke.iter());
            extend(BoundingBox::new(
                Vec3::xy(aabb.min.x as f64, aabb.min.y as f64),
                Vec3::xy(aabb.max.x as f64, aabb.max.y as f64),
            ));
        }
        for dot in &dots {
            extend(BoundingBox::new(
                dot.center - Vec3::xy(dot.radius, dot.radius),
                dot.center + Vec3::xy(dot.radius, dot.radius),
            ));
        }

        Self {
            strokes,
            dots,
            terminals,
            bounds: bounds.unwrap_or(BoundingBox::new(Vec3::default(), Vec3::default())),
        }
    }

    /// The standard terminal pair for box- and circle-style bipoles: one at
    /// each side of the body, pointing outward.
    pub fn bipole_terminals(half_width: f64) -> Vec<TerminalSpec> {
        vec![
            TerminalSpec {
                position: Vec3::xy(-half_width, 0.0),
                direction: schemkit_core::LEFT,
            },
            TerminalSpec {
                position: Vec3::xy(half_width, 0.0),
                direction: schemkit_core::RIGHT,
            },
        ]
    }
}

fn to_f32(p: Point) -> lyon::math::Point {
    point(p.x as f32, p.y as f32)
}

/// A single straight stroke.
pub fn line_between(a: Point, b: Point) -> Path {
    polyline(&[a, b])
}

/// An open polyline through `points`.
pub fn polyline(points: &[Point]) -> Path {
    let mut builder = Path::builder();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        builder.begin(to_f32(*first));
        for p in iter {
            builder.line_to(to_f32(*p));
        }
        builder.end(false);
    }
    builder.build()
}

/// A closed axis-aligned rectangle outline centred on `center`.
pub fn rectangle(center: Point, width: f64, height: f64) -> Path {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let mut builder = Path::builder();
    builder.begin(to_f32(center + Vec3::xy(-hw, -hh)));
    builder.line_to(to_f32(center + Vec3::xy(hw, -hh)));
    builder.line_to(to_f32(center + Vec3::xy(hw, hh)));
    builder.line_to(to_f32(center + Vec3::xy(-hw, hh)));
    builder.end(true);
    builder.build()
}

/// A full circle outline.
pub fn circle(center: Point, radius: f64) -> Path {
    let mut builder = Path::builder().with_svg();
    let radii = lyon::math::vector(radius as f32, radius as f32);
    let start = to_f32(center + Vec3::xy(radius, 0.0));
    let opposite = to_f32(center + Vec3::xy(-radius, 0.0));
    builder.move_to(start);
    builder.arc_to(
        radii,
        lyon::math::Angle::radians(0.0),
        ArcFlags { large_arc: false, sweep: true },
        opposite,
    );
    builder.arc_to(
        radii,
        lyon::math::Angle::radians(0.0),
        ArcFlags { large_arc: false, sweep: true },
        start,
    );
    builder.close();
    builder.build()
}

/// A circular arc from `start_angle` sweeping `sweep` radians (positive
/// anticlockwise) about `center`.
pub fn circle_arc(center: Point, radius: f64, start_angle: f64, sweep: f64) -> Path {
    let start = center + Vec3::xy(radius * start_angle.cos(), radius * start_angle.sin());
    let end_angle = start_angle + sweep;
    let end = center + Vec3::xy(radius * end_angle.cos(), radius * end_angle.sin());

    let mut builder = Path::builder().with_svg();
    builder.move_to(to_f32(start));
    builder.arc_to(
        lyon::math::vector(radius as f32, radius as f32),
        lyon::math::Angle::radians(0.0),
        ArcFlags {
            large_arc: sweep.abs() > std::f64::consts::PI,
            sweep: sweep > 0.0,
        },
        to_f32(end),
    );
    builder.build()
}

/// Resolve `config`'s half side length for square/round bipoles.
pub fn square_half_side(config: &SymbolConfig) -> f64 {
    config.square_bipole_side_length / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_bounds() {
        let path = polyline(&[Vec3::xy(-1.0, 0.0), Vec3::xy(1.0, 0.5)]);
        let body = SymbolBody::new(vec![path], vec![], vec![]);
        assert!((body.bounds.width() - 2.0).abs() < 1e-5);
        assert!((body.bounds.height() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_dot_extends_bounds() {
        let body = SymbolBody::new(
            vec![],
            vec![Dot {
                center: Vec3::xy(1.0, 0.0),
                radius: 0.25,
                filled: true,
            }],
            vec![],
        );
        assert!((body.bounds.max.x - 1.25).abs() < 1e-9);
        assert!((body.bounds.min.x - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_body_has_origin_bounds() {
        let body = SymbolBody::new(vec![], vec![], vec![]);
        assert_eq!(body.bounds.width(), 0.0);
    }
}
