mod render;

use bevy::{log::LogPlugin, prelude::*};
use vector::{Figure, Vector, VectorError};

const WINDOW_SIZE: f32 = 720.0;

fn demo_figure() -> Result<Figure, VectorError> {
    let a = Vector::from_numbers([1, 2])?;
    let b = Vector::from_numbers([3, 4])?;
    let sum = (&a + &b)?;
    let scaled = 3 * &a;

    log::info!("a = {:?}, b = {:?}", a, b);
    log::info!("a + b = {:?}, |a + b| = {}", sum, sum.norm());
    log::info!("b - a = {:?}", (&b - &a)?);
    log::info!("3 * a = {:?}", scaled);

    let mut figure = Figure::new();
    sum.plot(&[a, b, scaled], &mut figure)?;
    Ok(figure)
}

fn setup_plot(
    mut commands: Commands,
    mut materials: ResMut<Assets<ColorMaterial>>,
    figure: Res<Figure>,
) {
    commands.spawn_bundle(OrthographicCameraBundle::new_2d());

    let strokes = render::figure_strokes(&figure, Vec2::splat(WINDOW_SIZE));
    log::debug!("spawning {} strokes", strokes.len());
    for stroke in &strokes {
        commands.spawn_bundle(render::stroke_sprite(stroke, &mut materials));
    }
}

fn main() {
    env_logger::init();

    let figure = match demo_figure() {
        Ok(figure) => figure,
        Err(err) => {
            log::error!("failed to build plot: {}", err);
            std::process::exit(1);
        }
    };

    App::build()
        .insert_resource(WindowDescriptor {
            title: render::window_title(&figure),
            width: WINDOW_SIZE,
            height: WINDOW_SIZE,
            ..Default::default()
        })
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(Msaa { samples: 4 })
        .insert_resource(figure)
        // env_logger owns the global logger
        .add_plugins_with(DefaultPlugins, |group| group.disable::<LogPlugin>())
        .add_startup_system(setup_plot.system())
        .run();
}
