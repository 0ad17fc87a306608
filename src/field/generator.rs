use kurbo::{BezPath, ParamCurveArclen, Point};

use crate::foundation::error::{HeroError, HeroResult};

/// Paths per field on the landing page.
pub const DEFAULT_PATH_COUNT: usize = 36;

/// Coordinate system of a single field.
pub const FIELD_VIEWBOX: (f64, f64) = (696.0, 316.0);

/// Horizontal spread direction of a field. Two fields with opposite directions
/// produce the mirrored left/right flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = HeroError;

    fn try_from(position: i32) -> HeroResult<Self> {
        match position {
            1 => Ok(Self::Right),
            -1 => Ok(Self::Left),
            other => Err(HeroError::validation(format!(
                "field position must be +1 or -1, got {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathDescriptor {
    pub id: usize,
    #[serde(rename = "d", serialize_with = "serialize_svg_path")]
    pub curve: BezPath,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
}

impl PathDescriptor {
    /// SVG `d` attribute for this path.
    pub fn curve_command(&self) -> String {
        self.curve.to_svg()
    }

    /// Arc length of the curve in field units.
    pub fn length(&self) -> f64 {
        self.curve.segments().map(|seg| seg.arclen(1e-3)).sum()
    }
}

fn serialize_svg_path<S: serde::Serializer>(path: &BezPath, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_svg())
}

/// Build the field of `count` parallel, diagonally skewed curves.
///
/// Later paths are thicker and more opaque. A zero count yields an empty field.
pub fn generate(direction: Direction, count: usize) -> Vec<PathDescriptor> {
    if count == 0 {
        tracing::debug!(direction = direction.label(), "empty path field requested");
        return Vec::new();
    }
    (0..count).map(|i| describe(i, direction)).collect()
}

fn describe(i: usize, direction: Direction) -> PathDescriptor {
    let fi = i as f64;
    let dx = 5.0 * fi * direction.sign();
    let dy = 6.0 * fi;

    let start = Point::new(-(380.0 - dx), -(189.0 + dy));
    let end = Point::new(684.0 - dx, 875.0 - dy);

    let mut curve = BezPath::new();
    curve.move_to(start);
    curve.curve_to(
        start,
        Point::new(-(312.0 - dx), 216.0 - dy),
        Point::new(152.0 - dx, 343.0 - dy),
    );
    curve.curve_to(Point::new(616.0 - dx, 470.0 - dy), end, end);

    PathDescriptor {
        id: i,
        curve,
        stroke_width: 0.5 + fi * 0.03,
        stroke_opacity: 0.1 + fi * 0.03,
    }
}
