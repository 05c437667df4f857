use crate::{error::VectorError, vector::Vector};
use glam::Vec2;
use serde::{Deserialize, Serialize};

// TODO: derive the limits from the plotted endpoints instead of fixing them
pub const PLOT_LIMITS: AxisLimits = AxisLimits {
    min: -2.0,
    max: 10.0,
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub min: f32,
    pub max: f32,
}

impl AxisLimits {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Units arrow lengths are measured in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowUnits {
    /// Data coordinates of the axes.
    Xy,
    /// Fraction of the plot width.
    Width,
}

/// How arrow directions are interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowAngles {
    /// Arrow points from `(x, y)` to `(x + u, y + v)` in data coordinates.
    Xy,
    /// Angle measured on screen, ignoring the axes aspect ratio.
    Uv,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuiverStyle {
    /// Data units per arrow unit; `1.0` draws arrows at their true length.
    pub scale: f32,
    pub units: ArrowUnits,
    pub angles: ArrowAngles,
}

impl Default for QuiverStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            units: ArrowUnits::Xy,
            angles: ArrowAngles::Xy,
        }
    }
}

/// A 2D charting backend that vectors render through.
///
/// The calls mirror the usual figure workflow: create axes, draw arrows, then
/// decorate. Implementations are free to buffer or draw immediately.
pub trait Plotter {
    fn new_axes(&mut self);
    /// Draws one arrow per `(origins[i], tips[i])` pair.
    fn quiver(&mut self, origins: &[Vec2], tips: &[Vec2], style: QuiverStyle);
    fn set_labels(&mut self, x: &str, y: &str);
    fn set_title(&mut self, title: &str);
    fn set_limits(&mut self, x: AxisLimits, y: AxisLimits);
    fn grid(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub origin: Vec2,
    pub tip: Vec2,
    pub style: QuiverStyle,
}

/// A `Plotter` that records what was drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_limits: AxisLimits,
    pub y_limits: AxisLimits,
    pub grid: bool,
    pub arrows: Vec<Arrow>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plotter for Figure {
    fn new_axes(&mut self) {
        *self = Self::new();
    }

    /// Unpaired trailing origins or tips are dropped.
    fn quiver(&mut self, origins: &[Vec2], tips: &[Vec2], style: QuiverStyle) {
        if origins.len() != tips.len() {
            log::warn!(
                "quiver got {} origins and {} tips, drawing {} arrows",
                origins.len(),
                tips.len(),
                origins.len().min(tips.len())
            );
        }
        self.arrows
            .extend(origins.iter().zip(tips.iter()).map(|(&origin, &tip)| Arrow {
                origin,
                tip,
                style,
            }));
    }

    fn set_labels(&mut self, x: &str, y: &str) {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_limits(&mut self, x: AxisLimits, y: AxisLimits) {
        self.x_limits = x;
        self.y_limits = y;
    }

    fn grid(&mut self) {
        self.grid = true;
    }
}

/// A `Plotter` that draws nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullPlotter;

impl Plotter for NullPlotter {
    fn new_axes(&mut self) {}
    fn quiver(&mut self, _origins: &[Vec2], _tips: &[Vec2], _style: QuiverStyle) {}
    fn set_labels(&mut self, _x: &str, _y: &str) {}
    fn set_title(&mut self, _title: &str) {}
    fn set_limits(&mut self, _x: AxisLimits, _y: AxisLimits) {}
    fn grid(&mut self) {}
}

// Tuple style, `()` when empty and `(Vector(1.0, 2.0),)` for a single vector.
fn tuple_repr(vectors: &[Vector]) -> String {
    let items: Vec<String> = vectors.iter().map(|v| format!("{:?}", v)).collect();
    match items.len() {
        1 => format!("({},)", items[0]),
        _ => format!("({})", items.join(", ")),
    }
}

fn planar(vector: &Vector) -> Result<Vec2, VectorError> {
    vector.as_vec2().ok_or(VectorError::NotPlanar {
        dimension: vector.dimension(),
    })
}

impl Vector {
    /// Draws `self` and `others` as arrows from the origin.
    ///
    /// `self` is drawn last. Every vector must be 2D; nothing is drawn
    /// otherwise.
    pub fn plot<P: Plotter>(&self, others: &[Vector], plotter: &mut P) -> Result<(), VectorError> {
        let mut tips = Vec::with_capacity(others.len() + 1);
        for vector in others {
            tips.push(planar(vector)?);
        }
        tips.push(planar(self)?);

        let origins = vec![Vec2::ZERO; tips.len()];
        log::debug!("plotting {} arrows", tips.len());

        plotter.new_axes();
        plotter.quiver(&origins, &tips, QuiverStyle::default());
        plotter.set_labels("x", "y");
        plotter.set_title(&format!("{:?}, {}", self, tuple_repr(others)));
        plotter.set_limits(PLOT_LIMITS, PLOT_LIMITS);
        plotter.grid();
        Ok(())
    }
}

#[test]
fn test_plot_records_figure() {
    let a = Vector::new(&[1.0, 2.0]).unwrap();
    let b = Vector::new(&[3.0, 4.0]).unwrap();
    let sum = (&a + &b).unwrap();

    let mut figure = Figure::new();
    sum.plot(&[a, b], &mut figure).unwrap();

    let tips: Vec<Vec2> = figure.arrows.iter().map(|arrow| arrow.tip).collect();
    assert_eq!(
        tips,
        vec![
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(4.0, 6.0)
        ]
    );
    assert!(figure.arrows.iter().all(|arrow| arrow.origin == Vec2::ZERO));
    assert!(figure
        .arrows
        .iter()
        .all(|arrow| arrow.style == QuiverStyle::default()));
    assert_eq!(figure.x_label, "x");
    assert_eq!(figure.y_label, "y");
    assert_eq!(
        figure.title,
        "Vector(4.0, 6.0), (Vector(1.0, 2.0), Vector(3.0, 4.0))"
    );
    assert_eq!(figure.x_limits, AxisLimits::new(-2.0, 10.0));
    assert_eq!(figure.y_limits, AxisLimits::new(-2.0, 10.0));
    assert!(figure.grid);
}

#[test]
fn test_plot_alone() {
    let a = Vector::new(&[1.0, -1.0]).unwrap();
    let mut figure = Figure::new();
    a.plot(&[], &mut figure).unwrap();
    assert_eq!(figure.arrows.len(), 1);
    assert_eq!(figure.title, "Vector(1.0, -1.0), ()");

    let b = Vector::new(&[2.0, 0.5]).unwrap();
    a.plot(&[b], &mut figure).unwrap();
    assert_eq!(figure.title, "Vector(1.0, -1.0), (Vector(2.0, 0.5),)");

    // replotting starts from fresh axes
    a.plot(&[], &mut figure).unwrap();
    assert_eq!(figure.title, "Vector(1.0, -1.0), ()");
    assert_eq!(figure.arrows.len(), 1);
}

#[test]
fn test_plot_rejects_non_planar() {
    let a = Vector::new(&[1.0, 2.0]).unwrap();
    let c = Vector::new(&[1.0, 2.0, 3.0]).unwrap();

    let mut figure = Figure::new();
    let err = a.plot(&[c.clone()], &mut figure).unwrap_err();
    assert!(err.is_type_error());
    assert!(matches!(err, VectorError::NotPlanar { dimension: 3 }));
    assert_eq!(figure, Figure::new());

    let err = c.plot(&[a], &mut NullPlotter).unwrap_err();
    assert!(matches!(err, VectorError::NotPlanar { dimension: 3 }));
}

#[test]
fn test_figure_json() {
    let a = Vector::new(&[1.0, 2.0]).unwrap();
    let mut figure = Figure::new();
    a.plot(&[], &mut figure).unwrap();

    let json = serde_json::to_value(&figure).unwrap();
    assert_eq!(json["x_limits"]["min"], -2.0);
    assert_eq!(json["arrows"][0]["style"]["units"], "Xy");

    let back: Figure = serde_json::from_value(json).unwrap();
    assert_eq!(back, figure);
}

#[test]
fn test_quiver_unpaired() {
    let mut figure = Figure::new();
    figure.quiver(
        &[Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::ZERO],
        &[Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        QuiverStyle::default(),
    );
    assert_eq!(figure.arrows.len(), 2);
    assert_eq!(figure.arrows[1].origin, Vec2::new(1.0, 1.0));
    assert_eq!(figure.arrows[1].tip, Vec2::new(0.0, 1.0));

    figure.quiver(&[], &[Vec2::new(1.0, 1.0)], QuiverStyle::default());
    assert_eq!(figure.arrows.len(), 2);
}
