use bevy::prelude::*;
use vector::plot::{ArrowAngles, ArrowUnits, AxisLimits, Figure};
#[cfg(test)]
use vector::plot::{Arrow, QuiverStyle};

const MARGIN: f32 = 40.0;
const GRID_WIDTH: f32 = 1.0;
const AXIS_WIDTH: f32 = 2.0;
const ARROW_WIDTH: f32 = 3.0;
const HEAD_LENGTH: f32 = 14.0;
// 150 degrees either side of the shaft direction
const HEAD_ANGLE: f32 = std::f32::consts::PI * 5.0 / 6.0;

/// A straight line in screen space, centred on the window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
    pub color: Color,
    pub layer: f32,
}

struct Viewport {
    x: AxisLimits,
    y: AxisLimits,
    size: Vec2,
}

impl Viewport {
    fn to_screen(&self, pt: Vec2) -> Vec2 {
        Vec2::new(
            ((pt.x - self.x.min) / self.x.span() - 0.5) * self.size.x,
            ((pt.y - self.y.min) / self.y.span() - 0.5) * self.size.y,
        )
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn integer_ticks(limits: AxisLimits) -> impl Iterator<Item = f32> {
    (limits.min.ceil() as i32..=limits.max.floor() as i32).map(|tick| tick as f32)
}

pub fn window_title(figure: &Figure) -> String {
    format!("{} [{} / {}]", figure.title, figure.x_label, figure.y_label)
}

/// Lays out the grid, axes and arrows of `figure` in a window of `window` pixels.
pub fn figure_strokes(figure: &Figure, window: Vec2) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    if figure.x_limits.span() <= 0.0 || figure.y_limits.span() <= 0.0 {
        log::warn!("empty plot limits, nothing to draw");
        return strokes;
    }

    let view = Viewport {
        x: figure.x_limits,
        y: figure.y_limits,
        size: window - Vec2::splat(2.0 * MARGIN),
    };
    let (x, y) = (view.x, view.y);

    let mut line = |start: Vec2, end: Vec2, width: f32, color: Color, layer: f32| {
        strokes.push(Stroke {
            start: view.to_screen(start),
            end: view.to_screen(end),
            width,
            color,
            layer,
        })
    };

    if figure.grid {
        let grey = Color::rgb(0.85, 0.85, 0.85);
        for tick in integer_ticks(x) {
            line(
                Vec2::new(tick, y.min),
                Vec2::new(tick, y.max),
                GRID_WIDTH,
                grey,
                0.0,
            );
        }
        for tick in integer_ticks(y) {
            line(
                Vec2::new(x.min, tick),
                Vec2::new(x.max, tick),
                GRID_WIDTH,
                grey,
                0.0,
            );
        }
    }

    let dark = Color::rgb(0.3, 0.3, 0.3);
    if x.min <= 0.0 && 0.0 <= x.max {
        line(
            Vec2::new(0.0, y.min),
            Vec2::new(0.0, y.max),
            AXIS_WIDTH,
            dark,
            1.0,
        );
    }
    if y.min <= 0.0 && 0.0 <= y.max {
        line(
            Vec2::new(x.min, 0.0),
            Vec2::new(x.max, 0.0),
            AXIS_WIDTH,
            dark,
            1.0,
        );
    }

    for arrow in &figure.arrows {
        let style = arrow.style;
        if !(style.scale.is_finite() && style.scale > 0.0) {
            log::warn!("skipping arrow with invalid scale {}", style.scale);
            continue;
        }
        let units = match style.units {
            ArrowUnits::Xy => 1.0,
            ArrowUnits::Width => x.span(),
        };
        let delta = arrow.tip * (units / style.scale);
        let start = view.to_screen(arrow.origin);
        let data_end = view.to_screen(arrow.origin + delta);
        let end = match style.angles {
            ArrowAngles::Xy => data_end,
            ArrowAngles::Uv if delta.length() > 0.0 => {
                start + delta.normalize() * (data_end - start).length()
            }
            ArrowAngles::Uv => start,
        };

        let shaft = end - start;
        if shaft.length() < f32::EPSILON {
            log::debug!("skipping zero length arrow at {}", arrow.origin);
            continue;
        }

        let mut push = |from: Vec2, to: Vec2| {
            strokes.push(Stroke {
                start: from,
                end: to,
                width: ARROW_WIDTH,
                color: Color::BLACK,
                layer: 2.0,
            })
        };
        push(start, end);

        let back = shaft.normalize() * HEAD_LENGTH.min(shaft.length() * 0.3);
        push(end, end + rotate(back, HEAD_ANGLE));
        push(end, end + rotate(back, -HEAD_ANGLE));
    }

    strokes
}

pub fn stroke_sprite(stroke: &Stroke, materials: &mut Assets<ColorMaterial>) -> SpriteBundle {
    let delta = stroke.end - stroke.start;
    let centre = (stroke.start + stroke.end) * 0.5;
    SpriteBundle {
        material: materials.add(stroke.color.into()),
        sprite: Sprite::new(Vec2::new(delta.length(), stroke.width)),
        transform: Transform {
            translation: centre.extend(stroke.layer),
            rotation: Quat::from_rotation_z(delta.y.atan2(delta.x)),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_figure_strokes() {
    use vector::{Plotter, Vector};

    let a = Vector::new(&[4.0, 0.0]).unwrap();
    let mut figure = Figure::new();
    a.plot(&[], &mut figure).unwrap();

    // limits are -2..10 on both axes, so 12 data units span 480 pixels
    let strokes = figure_strokes(&figure, Vec2::splat(560.0));

    // 13 ticks per axis, 2 axes, shaft + 2 barbs
    assert_eq!(strokes.len(), 13 + 13 + 2 + 3);

    let arrows: Vec<&Stroke> = strokes.iter().filter(|s| s.layer == 2.0).collect();
    assert_eq!(arrows.len(), 3);

    let shaft = arrows[0];
    assert!(shaft.start.abs_diff_eq(Vec2::new(-160.0, -160.0), 1e-3));
    assert!(shaft.end.abs_diff_eq(Vec2::new(0.0, -160.0), 1e-3));

    // barbs point back from the tip, one either side of the shaft
    for barb in &arrows[1..] {
        assert_eq!(barb.start, shaft.end);
        assert!(barb.end.x < shaft.end.x);
        assert!(((barb.end - barb.start).length() - HEAD_LENGTH).abs() < 1e-3);
    }
    assert!((arrows[1].end.y - shaft.end.y) * (arrows[2].end.y - shaft.end.y) < 0.0);

    figure.new_axes();
    figure.x_limits = AxisLimits::new(1.0, 1.0);
    assert!(figure_strokes(&figure, Vec2::splat(560.0)).is_empty());
}

#[test]
fn test_window_title() {
    use vector::Vector;

    let a = Vector::new(&[1.0, 2.0]).unwrap();
    let mut figure = Figure::new();
    a.plot(&[], &mut figure).unwrap();
    assert_eq!(window_title(&figure), "Vector(1.0, 2.0), () [x / y]");
}

#[cfg(test)]
fn arrow_figure(x_limits: AxisLimits, y_limits: AxisLimits, arrows: Vec<Arrow>) -> Figure {
    Figure {
        x_limits,
        y_limits,
        arrows,
        ..Figure::new()
    }
}

#[cfg(test)]
fn shafts(figure: &Figure) -> Vec<Stroke> {
    // every drawn arrow is a shaft followed by two barbs
    figure_strokes(figure, Vec2::splat(560.0))
        .into_iter()
        .filter(|s| s.layer == 2.0)
        .step_by(3)
        .collect()
}

#[test]
fn test_arrow_styles() {
    // x spans 0..4 and y spans 0..8 over 480 pixels, so the axes are not square
    let x = AxisLimits::new(0.0, 4.0);
    let y = AxisLimits::new(0.0, 8.0);
    let corner = Vec2::new(-240.0, -240.0);

    let width = QuiverStyle {
        scale: 1.0,
        units: ArrowUnits::Width,
        angles: ArrowAngles::Xy,
    };
    let figure = arrow_figure(
        x,
        y,
        vec![Arrow {
            origin: Vec2::ZERO,
            tip: Vec2::new(0.5, 0.0),
            style: width,
        }],
    );
    // half the plot width is two data units, 240 pixels
    let shaft = shafts(&figure)[0];
    assert!(shaft.start.abs_diff_eq(corner, 1e-3));
    assert!(shaft.end.abs_diff_eq(Vec2::new(0.0, -240.0), 1e-3));

    let scaled = QuiverStyle {
        scale: 2.0,
        ..QuiverStyle::default()
    };
    let figure = arrow_figure(
        x,
        y,
        vec![Arrow {
            origin: Vec2::ZERO,
            tip: Vec2::new(2.0, 4.0),
            style: scaled,
        }],
    );
    let shaft = shafts(&figure)[0];
    assert!(shaft.end.abs_diff_eq(Vec2::new(-120.0, -120.0), 1e-3));

    // data angle (1, 1) would be 60 pixels by 120 on screen; uv keeps 45 degrees
    let uv = QuiverStyle {
        scale: 1.0,
        units: ArrowUnits::Xy,
        angles: ArrowAngles::Uv,
    };
    let figure = arrow_figure(
        x,
        y,
        vec![
            Arrow {
                origin: Vec2::ZERO,
                tip: Vec2::new(1.0, 1.0),
                style: uv,
            },
            Arrow {
                origin: Vec2::ZERO,
                tip: Vec2::ZERO,
                style: uv,
            },
        ],
    );
    let drawn = shafts(&figure);
    assert_eq!(drawn.len(), 1);
    let delta = drawn[0].end - drawn[0].start;
    assert!((delta.x - delta.y).abs() < 1e-3);
    let screen_length = Vec2::new(120.0, 60.0).length();
    assert!((delta.length() - screen_length).abs() < 1e-3);
}

#[test]
fn test_invalid_scale_skipped() {
    let limits = AxisLimits::new(-2.0, 10.0);
    let arrow = |scale: f32| Arrow {
        origin: Vec2::ZERO,
        tip: Vec2::new(1.0, 1.0),
        style: QuiverStyle {
            scale,
            ..QuiverStyle::default()
        },
    };
    let figure = arrow_figure(
        limits,
        limits,
        vec![arrow(0.0), arrow(-1.0), arrow(f32::NAN), arrow(f32::INFINITY), arrow(1.0)],
    );

    let strokes = figure_strokes(&figure, Vec2::splat(560.0));
    assert!(strokes
        .iter()
        .all(|s| [s.start.x, s.start.y, s.end.x, s.end.y]
            .iter()
            .all(|v| v.is_finite())));
    assert_eq!(shafts(&figure).len(), 1);
}
