//! End-to-end frame tests: scripted readings through to recorded draw calls.

use approx::assert_relative_eq;
use imucube_core::geometry::DEFAULT_FACE_COLORS;
use imucube_core::{
    Canvas, FrameDriver, Orientation, RecordingSurface, RenderSurface, Rgb, ScriptedSource,
    ViewerConfig,
};

fn colors_for(order: &[usize]) -> Vec<Rgb> {
    order.iter().map(|&i| DEFAULT_FACE_COLORS[i]).collect()
}

#[test]
fn reading_changes_orientation_and_face_order() {
    let config = ViewerConfig::default();
    let mut source = ScriptedSource::new();
    source.push_idle();
    source.push_line("55.0,10.0,-20.0");
    let mut driver = FrameDriver::new(source, &config);
    let mut surface = RecordingSurface::new(config.width, config.height);

    let first = driver.step(&mut surface).unwrap();
    assert_eq!(first.orientation, Orientation::zero());
    assert_eq!(first.stats.order, [5, 0, 1, 2, 3, 4]);
    assert_eq!(surface.fill_colors(), colors_for(&[5, 0, 1, 2, 3, 4]));
    surface.take_commands();

    let second = driver.step(&mut surface).unwrap();
    assert!(second.updated);
    assert_relative_eq!(second.orientation.roll, 55.0_f32.to_radians());
    assert_relative_eq!(second.orientation.pitch, 10.0_f32.to_radians());
    assert_relative_eq!(second.orientation.yaw, (-20.0_f32).to_radians());
    assert_eq!(second.stats.order, [5, 1, 3, 2, 0, 4]);
    assert_eq!(surface.fill_colors(), colors_for(&[5, 1, 3, 2, 0, 4]));
}

#[test]
fn malformed_reading_leaves_orientation_unchanged() {
    let config = ViewerConfig::default();
    let source = ScriptedSource::from_lines(["30,0,0", "bad,data", "1,2,3,4"]);
    let mut driver = FrameDriver::new(source, &config);
    let mut surface = RecordingSurface::new(config.width, config.height);

    let good = driver.step(&mut surface).unwrap().orientation;
    for _ in 0..2 {
        let report = driver.step(&mut surface).unwrap();
        assert!(!report.updated);
        assert_eq!(report.orientation, good);
    }
}

#[test]
fn canvas_frame_shows_background_and_front_face() {
    let config = ViewerConfig::default();
    let mut driver = FrameDriver::new(ScriptedSource::new(), &config);
    let mut canvas = Canvas::new(config.width, config.height);
    driver.step(&mut canvas).unwrap();

    // Corner is background; center is covered by the nearest (z = -1) face
    assert_eq!(canvas.pixel(0, 0), Some(config.background));
    assert_eq!(canvas.pixel(400, 300), Some(DEFAULT_FACE_COLORS[4]));
    // Outline of the near face runs along x = 350
    assert_eq!(canvas.pixel(350, 300), Some(config.outline));
    assert_eq!(canvas.texts().len(), 1);
    assert_eq!(canvas.width(), 800);
}
