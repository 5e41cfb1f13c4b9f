//! Icon designs as data
//!
//! A [`Design`] is a per-pixel colour function assembled from a background
//! fill, an optional plate, stroked glyphs and an optional outer mask. The
//! built-in presets cover the app and menu-bar icons; custom designs can be
//! described inline in a manifest.
//!
//! All lengths are fractions of the image width so a design renders the same
//! shape at every size.

use crate::error::{IconError, Result};
use crate::geometry::{blend_channel, lerp_channel, stroke_coverage, Point, Segment};
use crate::raster::{Pixel, TRANSPARENT};
use image::Rgba;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Names accepted by [`Design::preset`].
pub const PRESET_NAMES: &[&str] = &[
    "checkmark_circle",
    "todo_list",
    "squircle_check",
    "menubar_check",
    "menubar_list",
];

/// Anything that can colour a pixel given its position and the image size.
pub trait PixelSource {
    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Pixel;
}

impl<F> PixelSource for F
where
    F: Fn(u32, u32, u32, u32) -> Pixel,
{
    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Pixel {
        self(x, y, width, height)
    }
}

/// An RGBA colour read from CSS notation (`"#4f46e5"`, `"rgba(255,255,255,0.94)"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub Pixel);

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Rgba([r, g, b, a]))
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl FromStr for Color {
    type Err = IconError;

    fn from_str(value: &str) -> Result<Self> {
        let to_byte = |channel: f32| (channel * 255.).round().clamp(0., 255.) as u8;
        css_color::Srgb::from_str(value)
            .map(|color| {
                Color(Rgba([
                    to_byte(color.red),
                    to_byte(color.green),
                    to_byte(color.blue),
                    to_byte(color.alpha),
                ]))
            })
            .map_err(|err| IconError::InvalidColor {
                value: value.to_string(),
                reason: format!("{err:?}"),
            })
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction of the blend factor `t` across the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
    /// Average of the horizontal and vertical factors.
    Diagonal,
}

/// Linear RGB interpolation between two endpoint colours. Output is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Gradient {
    pub from: Color,
    pub to: Color,
    #[serde(default)]
    pub axis: Axis,
}

impl Gradient {
    pub fn blend_factor(&self, x: u32, y: u32, width: u32, height: u32) -> f64 {
        let nx = x as f64 / width as f64;
        let ny = y as f64 / height as f64;
        match self.axis {
            Axis::Horizontal => nx,
            Axis::Vertical => ny,
            Axis::Diagonal => (nx + ny) / 2.0,
        }
    }

    pub fn at(&self, t: f64) -> Pixel {
        let (a, b) = (self.from.0 .0, self.to.0 .0);
        Rgba([
            lerp_channel(a[0], b[0], t),
            lerp_channel(a[1], b[1], t),
            lerp_channel(a[2], b[2], t),
            255,
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: Color },
    Gradient(Gradient),
}

impl Fill {
    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Pixel {
        match self {
            Fill::Solid { color } => color.0,
            Fill::Gradient(gradient) => gradient.at(gradient.blend_factor(x, y, width, height)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// Binary inside/outside.
    #[default]
    Hard,
    /// One-pixel linear falloff inside the boundary.
    Smooth,
}

/// A centred region, sized relative to the image width.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f64 },
    /// Rectangle inset by `padding` on every side, with quarter-circle
    /// corners. `radius` is a fraction of the inset box's width.
    RoundedRect { padding: f64, radius: f64 },
}

impl Shape {
    /// Distance past the shape's inner core and the radius it may reach, in
    /// pixels. `None` when the shape is empty at this size.
    fn edge_distance(&self, x: u32, y: u32, width: u32, height: u32) -> Option<(f64, f64)> {
        let w = width as f64;
        let cx = w / 2.0;
        let cy = height as f64 / 2.0;
        let ax = (x as f64 - cx).abs();
        let ay = (y as f64 - cy).abs();

        match *self {
            Shape::Circle { radius } => Some(((ax * ax + ay * ay).sqrt(), radius * w)),
            Shape::RoundedRect { padding, radius } => {
                let pad = w * padding;
                let hx = cx - pad;
                let hy = cy - pad;
                if hx <= 0.0 || hy <= 0.0 {
                    return None;
                }
                let r = ((w - 2.0 * pad) * radius).clamp(0.0, hx.min(hy));
                let dx = (ax - (hx - r)).max(0.0);
                let dy = (ay - (hy - r)).max(0.0);
                Some(((dx * dx + dy * dy).sqrt(), r))
            }
        }
    }

    /// Fraction of the pixel inside the shape, in `[0, 1]`.
    ///
    /// A hard circle excludes its boundary, so a zero radius covers nothing.
    /// A hard rectangle includes it, so a zero radius still fills the box.
    pub fn coverage(&self, x: u32, y: u32, width: u32, height: u32, edge: Edge) -> f64 {
        let Some((distance, radius)) = self.edge_distance(x, y, width, height) else {
            return 0.0;
        };
        let inside = match self {
            Shape::Circle { .. } => distance < radius,
            Shape::RoundedRect { .. } => distance <= radius,
        };
        match edge {
            Edge::Hard if inside => 1.0,
            Edge::Hard => 0.0,
            Edge::Smooth if distance > radius => 0.0,
            Edge::Smooth if distance > radius - 1.0 => radius - distance,
            Edge::Smooth => 1.0,
        }
    }
}

/// Outer silhouette; everything outside is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Mask {
    pub shape: Shape,
    #[serde(default)]
    pub edge: Edge,
}

/// A filled shape drawn over the background. Glyphs are clipped to it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Plate {
    pub shape: Shape,
    pub fill: Color,
    #[serde(default)]
    pub edge: Edge,
}

/// A polyline stroked at `half_width` around its spine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stroke {
    pub path: Vec<Point>,
    pub half_width: f64,
}

impl Stroke {
    pub fn new(path: &[(f64, f64)], half_width: f64) -> Self {
        Self {
            path: path.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            half_width,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let single = (self.path.len() == 1).then(|| Segment::new(self.path[0], self.path[0]));
        self.path
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .chain(single)
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        self.segments()
            .map(|segment| segment.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Strokes in a centre-origin frame where one unit is `scale` times the width
/// of the image after removing `inset` of the width from each side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Glyph {
    pub color: Color,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    #[serde(default)]
    pub inset: f64,
    /// Width of the antialiasing ramp inside each stroke edge, in glyph units.
    #[serde(default)]
    pub band: f64,
    pub strokes: Vec<Stroke>,
}

fn unit_scale() -> f64 {
    1.0
}

impl Glyph {
    pub fn to_glyph_space(&self, x: u32, y: u32, width: u32, height: u32) -> Point {
        let w = width as f64;
        let unit = (w - 2.0 * (w * self.inset)) * self.scale;
        Point::new(
            (x as f64 - width as f64 / 2.0) / unit,
            (y as f64 - height as f64 / 2.0) / unit,
        )
    }

    /// Stroke coverage at a pixel. Overlapping strokes do not accumulate;
    /// the strongest one wins.
    pub fn coverage(&self, x: u32, y: u32, width: u32, height: u32) -> f64 {
        let p = self.to_glyph_space(x, y, width, height);
        self.strokes
            .iter()
            .map(|stroke| stroke_coverage(stroke.distance_to(p), stroke.half_width, self.band))
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Design {
    pub background: Fill,
    #[serde(default)]
    pub plate: Option<Plate>,
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
    #[serde(default)]
    pub mask: Option<Mask>,
}

/// Straight-alpha mix of `fg` over `bg`. Over a fully transparent `bg` the
/// colour is the foreground's own, and only its alpha is scaled.
fn composite(bg: Pixel, fg: Pixel, coverage: f64) -> Pixel {
    let alpha = if bg[3] == fg[3] {
        bg[3]
    } else {
        blend_channel(bg[3], fg[3], coverage)
    };
    if bg[3] == 0 {
        return Rgba([fg[0], fg[1], fg[2], alpha]);
    }
    Rgba([
        blend_channel(bg[0], fg[0], coverage),
        blend_channel(bg[1], fg[1], coverage),
        blend_channel(bg[2], fg[2], coverage),
        alpha,
    ])
}

impl PixelSource for Design {
    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Pixel {
        let mask_coverage = self
            .mask
            .map(|mask| mask.shape.coverage(x, y, width, height, mask.edge))
            .unwrap_or(1.0);
        if mask_coverage <= 0.0 {
            return TRANSPARENT;
        }

        let mut pixel = self.background.color_at(x, y, width, height);

        let mut draw_glyphs = true;
        if let Some(plate) = &self.plate {
            let coverage = plate.shape.coverage(x, y, width, height, plate.edge);
            if coverage > 0.0 {
                pixel = composite(pixel, plate.fill.0, coverage);
            } else {
                draw_glyphs = false;
            }
        }

        if draw_glyphs {
            for glyph in &self.glyphs {
                let coverage = glyph.coverage(x, y, width, height);
                if coverage > 0.0 {
                    pixel = composite(pixel, glyph.color.0, coverage);
                }
            }
        }

        if mask_coverage < 1.0 {
            pixel[3] = (pixel[3] as f64 * mask_coverage) as u8;
        }
        pixel
    }
}

const BLUE: Color = Color::rgb(59, 130, 246);
const PURPLE: Color = Color::rgb(139, 92, 246);
const INDIGO_600: Color = Color::rgb(79, 70, 229);
const PURPLE_600: Color = Color::rgb(147, 51, 234);
const WHITE: Color = Color::rgb(255, 255, 255);
const BLACK: Color = Color::rgb(0, 0, 0);
const CLEAR: Color = Color::rgba(0, 0, 0, 0);

impl Design {
    /// Look up a built-in design by name.
    pub fn preset(name: &str) -> Result<Design> {
        match name {
            "checkmark_circle" => Ok(Self::checkmark_circle()),
            "todo_list" => Ok(Self::todo_list()),
            "squircle_check" => Ok(Self::squircle_check()),
            "menubar_check" => Ok(Self::menubar_check()),
            "menubar_list" => Ok(Self::menubar_list()),
            _ => Err(IconError::UnknownDesign(name.to_string())),
        }
    }

    /// Blue-to-purple sweep with a white disc and a blue checkmark.
    pub fn checkmark_circle() -> Design {
        Design {
            background: Fill::Gradient(Gradient {
                from: BLUE,
                to: PURPLE,
                axis: Axis::Horizontal,
            }),
            plate: Some(Plate {
                shape: Shape::Circle { radius: 0.35 },
                fill: Color::rgba(255, 255, 255, 240),
                edge: Edge::Hard,
            }),
            glyphs: vec![Glyph {
                color: BLUE,
                scale: 1.0,
                inset: 0.0,
                band: 0.0,
                strokes: vec![Stroke::new(&[(-0.2, -0.02), (-0.08, 0.16), (0.2, -0.16)], 0.035)],
            }],
            mask: None,
        }
    }

    /// Rounded square with a white disc holding a checkmark and list lines.
    pub fn todo_list() -> Design {
        // Glyph units are the disc radius.
        let disc = 160.0 / 512.0;
        Design {
            background: Fill::Gradient(Gradient {
                from: BLUE,
                to: PURPLE,
                axis: Axis::Diagonal,
            }),
            plate: Some(Plate {
                shape: Shape::Circle { radius: disc },
                fill: Color::rgba(255, 255, 255, 250),
                edge: Edge::Hard,
            }),
            glyphs: vec![
                Glyph {
                    color: BLUE,
                    scale: disc,
                    inset: 0.0,
                    band: 0.0,
                    strokes: vec![Stroke::new(&[(-0.6, 0.05), (-0.35, 0.35), (0.0, -0.2)], 0.1)],
                },
                Glyph {
                    color: PURPLE,
                    scale: disc,
                    inset: 0.0,
                    band: 0.0,
                    strokes: [-0.35, -0.05, 0.25]
                        .iter()
                        .map(|&y| Stroke::new(&[(0.15, y), (0.6, y)], 0.08))
                        .collect(),
                },
            ],
            mask: Some(Mask {
                shape: Shape::RoundedRect {
                    padding: 90.0 / 512.0,
                    radius: 110.0 / 332.0,
                },
                edge: Edge::Hard,
            }),
        }
    }

    /// Antialiased squircle, indigo-to-purple diagonal, white SDF checkmark.
    pub fn squircle_check() -> Design {
        let padding = 0.20;
        Design {
            background: Fill::Gradient(Gradient {
                from: INDIGO_600,
                to: PURPLE_600,
                axis: Axis::Diagonal,
            }),
            plate: None,
            glyphs: vec![Glyph {
                color: WHITE,
                scale: 0.55,
                inset: padding,
                band: 0.01,
                strokes: vec![Stroke::new(&[(-0.35, 0.05), (-0.05, 0.35), (0.45, -0.45)], 0.12)],
            }],
            mask: Some(Mask {
                shape: Shape::RoundedRect {
                    padding,
                    radius: 0.223,
                },
                edge: Edge::Smooth,
            }),
        }
    }

    /// Black checkmark on transparent, for template menu-bar images.
    pub fn menubar_check() -> Design {
        Design {
            background: Fill::Solid { color: CLEAR },
            plate: None,
            glyphs: vec![Glyph {
                color: BLACK,
                scale: 1.0,
                inset: 0.0,
                band: 0.05,
                strokes: vec![Stroke::new(&[(-0.3, 0.0), (-0.05, 0.25), (0.35, -0.25)], 0.12)],
            }],
            mask: None,
        }
    }

    /// Three list rows with checkbox ticks, laid out on a 22-unit grid.
    pub fn menubar_list() -> Design {
        let strokes = [-6.5, -0.5, 5.5]
            .iter()
            .flat_map(|&y| {
                [
                    Stroke::new(&[(-9.0, y), (-8.0, y)], 0.75),
                    Stroke::new(&[(-6.0, y), (7.0, y)], 0.75),
                ]
            })
            .collect();
        Design {
            background: Fill::Solid { color: CLEAR },
            plate: None,
            glyphs: vec![Glyph {
                color: BLACK,
                scale: 1.0 / 22.0,
                inset: 0.0,
                band: 0.0,
                strokes,
            }],
            mask: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_colors() {
        assert_eq!("#4f46e5".parse::<Color>().unwrap(), Color::rgb(79, 70, 229));
        assert_eq!("#fff".parse::<Color>().unwrap(), WHITE);
        assert_eq!("black".parse::<Color>().unwrap(), BLACK);
        assert!(matches!(
            "not-a-color".parse::<Color>(),
            Err(IconError::InvalidColor { .. })
        ));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(
            Design::preset("sparkles"),
            Err(IconError::UnknownDesign(name)) if name == "sparkles"
        ));
        for name in PRESET_NAMES {
            assert!(Design::preset(name).is_ok(), "{name} should resolve");
        }
    }

    #[test]
    fn rounded_rect_corners_are_cut() {
        let shape = Shape::RoundedRect {
            padding: 0.1,
            radius: 0.2,
        };
        // Centre and mid-edge points are in; the very corner of the box is out.
        assert_eq!(shape.coverage(50, 50, 100, 100, Edge::Hard), 1.0);
        assert_eq!(shape.coverage(11, 50, 100, 100, Edge::Hard), 1.0);
        assert_eq!(shape.coverage(11, 11, 100, 100, Edge::Hard), 0.0);
        assert_eq!(shape.coverage(5, 50, 100, 100, Edge::Hard), 0.0);
    }

    #[test]
    fn square_corners_fill_the_whole_box() {
        let shape = Shape::RoundedRect {
            padding: 0.25,
            radius: 0.0,
        };
        assert_eq!(shape.coverage(25, 25, 100, 100, Edge::Hard), 1.0);
        assert_eq!(shape.coverage(75, 75, 100, 100, Edge::Hard), 1.0);
        assert_eq!(shape.coverage(24, 50, 100, 100, Edge::Hard), 0.0);
    }

    #[test]
    fn empty_shapes_cover_nothing() {
        let dot = Shape::Circle { radius: 0.0 };
        let collapsed = Shape::RoundedRect {
            padding: 0.6,
            radius: 0.2,
        };
        for edge in [Edge::Hard, Edge::Smooth] {
            assert_eq!(dot.coverage(4, 4, 8, 8, edge), 0.0);
            assert_eq!(collapsed.coverage(16, 16, 32, 32, edge), 0.0);
            assert_eq!(collapsed.coverage(0, 0, 32, 32, edge), 0.0);
        }
    }

    #[test]
    fn smooth_edge_ramps_within_one_pixel() {
        let shape = Shape::Circle { radius: 0.25 };
        // Radius is 25px around (50, 50).
        assert_eq!(shape.coverage(50, 50, 100, 100, Edge::Smooth), 1.0);
        let edge = shape.coverage(74, 50, 100, 100, Edge::Smooth);
        assert!((edge - 1.0).abs() < 1e-6);
        assert_eq!(shape.coverage(75, 50, 100, 100, Edge::Smooth), 0.0);
        assert_eq!(shape.coverage(76, 50, 100, 100, Edge::Smooth), 0.0);
    }
}
