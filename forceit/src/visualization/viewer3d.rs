use bevy::math::primitives::Sphere;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;
use crate::simulation::tracking::{LatestHandSample, ScriptedMotion};

/// Component tagging each sphere with its index into the wall grid
#[derive(Component)]
struct WallIndex(pub usize);

/// Camera placement, simulation units
const CAMERA_HEIGHT: f32 = 100.0;
const CAMERA_DISTANCE: f32 = 250.0;

/// Force particles are tiny, draw them a bit larger than their radius
const FORCE_DRAW_SCALE: f32 = 1.5;

/// Open a window and run the scenario at its fixed tick rate.
///
/// The tick runs in `FixedUpdate`, independent of the render rate. Wall
/// spheres only copy positions out of the scenario each frame. Space
/// calibrates against the latest skeleton, Escape quits. While the cursor is
/// inside the window it steers the right hand and the left button opens it.
pub fn run_viewer(scenario: Scenario, motion: ScriptedMotion) {
    info!(
        "run_viewer: {} wall particles at {} Hz, press Space to calibrate",
        scenario.wall.len(),
        scenario.engine.tick_hz
    );

    let tick_hz = scenario.engine.tick_hz;

    App::new()
        .insert_resource(scenario)
        .insert_resource(motion)
        .insert_resource(LatestHandSample::new())
        .insert_resource(Time::<Fixed>::from_hz(tick_hz))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_viewer)
        .add_systems(FixedUpdate, (sense_system, physics_tick).chain())
        .add_systems(Update, (keyboard_system, sync_wall_transforms, draw_forces))
        .run();
}

/// Simulation space is y-down, z-into-the-wall; Bevy is y-up, -z forward
fn to_world(p: &NVec3) -> Vec3 {
    Vec3::new(p.x as f32, -p.y as f32, -p.z as f32)
}

fn setup_viewer(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, CAMERA_HEIGHT, CAMERA_DISTANCE)
            .looking_at(Vec3::new(0.0, CAMERA_HEIGHT, 0.0), Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5.0e7,
            range: 3000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(1000.0, CAMERA_HEIGHT, 1000.0),
        ..Default::default()
    });

    // All wall balls share one mesh, each gets its own material for speed colouring
    let radius = scenario.wall.particles().first().map_or(1.0, |p| p.radius as f32);
    let mesh = meshes.add(Sphere::new(radius).mesh());

    for (i, p) in scenario.wall.particles().iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: mesh.clone(),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 1.0, 1.0),
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_world(&p.x)),
                ..Default::default()
            },
            WallIndex(i),
        ));
    }
}

/// Sensor stand-in: publish the scripted skeleton for the current time,
/// with the right hand taken from the mouse when the cursor is in the window
fn sense_system(
    time: Res<Time>,
    motion: Res<ScriptedMotion>,
    latest: Res<LatestHandSample>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
) {
    let t = time.elapsed_seconds_f64();
    let cursor = windows.get_single().ok().and_then(|window| {
        let pos = window.cursor_position()?;
        let nx = (pos.x / window.width()) as f64 * 2.0 - 1.0;
        let ny = (pos.y / window.height()) as f64 * 2.0 - 1.0;
        Some((nx, ny))
    });

    let sample = match cursor {
        Some((nx, ny)) => motion.pointer_sample(t, nx, ny, buttons.pressed(MouseButton::Left)),
        None => motion.sample(t),
    };
    latest.publish(sample);
}

fn physics_tick(mut scenario: ResMut<Scenario>, latest: Res<LatestHandSample>) {
    let sample = latest.latest();
    scenario.advance(sample.as_ref());
}

fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    latest: Res<LatestHandSample>,
    mut scenario: ResMut<Scenario>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Space) {
        match latest.latest() {
            Some(skeleton) => scenario.calibrate(&skeleton),
            None => warn!("no skeleton tracked yet, calibration ignored"),
        }
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

fn speed_to_color(speed: f32, max_speed: f32) -> Color {
    if max_speed <= 0.0 {
        return Color::srgb(1.0, 1.0, 1.0);
    }
    let t = (speed / max_speed).clamp(0.0, 1.0);
    // white at rest, red when moving fast
    Color::srgb(1.0, 1.0 - t, 1.0 - t)
}

/// Wall particles moving faster than this are drawn fully red
const SPEED_FOR_FULL_COLOR: f32 = 5.0;

fn sync_wall_transforms(
    scenario: Res<Scenario>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&WallIndex, &mut Transform, &Handle<StandardMaterial>)>,
) {
    let balls = scenario.wall.particles();
    for (WallIndex(i), mut transform, mat_handle) in &mut query {
        if let Some(b) = balls.get(*i) {
            transform.translation = to_world(&b.x);

            let color = speed_to_color(b.v.norm() as f32, SPEED_FOR_FULL_COLOR);
            if let Some(mat) = materials.get_mut(mat_handle) {
                mat.base_color = color;
            }
        }
    }
}

fn draw_forces(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    for f in scenario.pool.views() {
        gizmos.sphere(
            to_world(&f.position),
            Quat::IDENTITY,
            f.radius as f32 * FORCE_DRAW_SCALE,
            Color::srgb(0.3, 0.6, 1.0),
        );
    }
}
