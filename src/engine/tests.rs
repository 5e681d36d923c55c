use glam::{Vec2, Vec3};
use web_time::Duration;

use super::*;
use crate::annotation::Annotation;
use crate::error::InteractionError;
use crate::interaction::Mode;

const CENTER: Vec2 = Vec2::new(400.0, 300.0);
const CORNER: Vec2 = Vec2::new(5.0, 5.0);

fn cube_engine() -> ExhibitEngine {
    let model = Model::cuboid("cube", Vec3::splat(-1.0), Vec3::ONE);
    let mut engine =
        ExhibitEngine::with_model(Options::default(), 800, 600, model);
    let _ = engine.tick(Duration::ZERO);
    engine
}

fn place(engine: &mut ExhibitEngine, title: &str, at: Vec3) {
    let _ = engine.store.add(title, "", Some(at)).unwrap();
}

fn settle(engine: &mut ExhibitEngine) -> FrameOutput {
    engine.tick(Duration::from_secs(5))
}

#[test]
fn model_load_fits_camera_and_reports_bounds() {
    let model = Model::cuboid("cube", Vec3::splat(-1.0), Vec3::ONE);
    let mut engine =
        ExhibitEngine::with_model(Options::default(), 800, 600, model);
    let frame = engine.tick(Duration::ZERO);
    assert_eq!(engine.load_state(), &LoadState::Loaded);
    assert!(frame
        .effects
        .iter()
        .any(|e| matches!(e, EngineEffect::ModelLoaded { .. })));
    assert_eq!(engine.camera().target, Vec3::ZERO);
    assert!(engine.camera().eye.z > 1.0);
}

#[test]
fn mode_commands_need_a_model() {
    let mut engine = ExhibitEngine::new(Options::default(), 800, 600);
    assert_eq!(
        engine.execute(ExhibitCommand::ToggleMeasuring),
        Err(InteractionError::ModelNotLoaded)
    );
    assert_eq!(engine.mode(), Mode::Idle);
    let frame = engine.tick(Duration::ZERO);
    assert!(matches!(frame.effects.as_slice(), [EngineEffect::Message(_)]));
}

#[test]
fn placement_flow_saves_annotation_and_returns_to_idle() {
    let mut engine = cube_engine();
    engine.execute(ExhibitCommand::BeginPlacement).unwrap();
    let frame = engine.tick(Duration::ZERO);
    assert!(frame
        .effects
        .contains(&EngineEffect::PlacementPanel { open: true }));
    assert!(frame
        .effects
        .contains(&EngineEffect::CursorChanged(CursorStyle::Crosshair)));
    assert!(!engine.can_save());

    let save = |title: &str| ExhibitCommand::SaveAnnotation {
        title: title.into(),
        description: String::new(),
    };
    assert_eq!(
        engine.execute(save("Nose")),
        Err(InteractionError::NoStagedPosition)
    );

    engine.execute(ExhibitCommand::Click { position: CENTER }).unwrap();
    let staged = engine.pending_placement().unwrap();
    assert!((staged - Vec3::Z).length() < 1e-4);
    assert!(engine.can_save());

    assert_eq!(engine.execute(save("   ")), Err(InteractionError::EmptyTitle));
    assert_eq!(engine.mode(), Mode::PlacingAnnotation);
    assert!(engine.annotations().is_empty());

    engine.execute(save("Nose")).unwrap();
    assert_eq!(engine.mode(), Mode::Idle);
    assert_eq!(engine.annotations().len(), 1);
    let saved = engine.annotations().get(0).unwrap();
    assert_eq!(saved.ordinal(), 1);
    assert_eq!(saved.description(), "No description provided.");

    let frame = engine.tick(Duration::ZERO);
    assert!(frame
        .effects
        .contains(&EngineEffect::PlacementPanel { open: false }));
    assert_eq!(engine.cursor(), CursorStyle::Default);
    assert_eq!(frame.labels.len(), 1);
}

#[test]
fn placement_click_off_model_stages_nothing() {
    let mut engine = cube_engine();
    engine.execute(ExhibitCommand::BeginPlacement).unwrap();
    engine.execute(ExhibitCommand::Click { position: CORNER }).unwrap();
    assert_eq!(engine.pending_placement(), None);
}

#[test]
fn preview_follows_the_surface() {
    let mut engine = cube_engine();
    engine.execute(ExhibitCommand::BeginPlacement).unwrap();
    assert!(!engine.preview().unwrap().visible);

    engine
        .execute(ExhibitCommand::PointerMoved { position: CENTER })
        .unwrap();
    let preview = engine.preview().unwrap();
    assert!(preview.visible);
    assert!((preview.position - Vec3::Z).length() < 1e-4);

    engine
        .execute(ExhibitCommand::PointerMoved { position: CORNER })
        .unwrap();
    assert!(!engine.preview().unwrap().visible);
}

#[test]
fn idle_marker_click_focuses_annotation() {
    let mut engine = cube_engine();
    place(&mut engine, "front", Vec3::Z);
    engine.execute(ExhibitCommand::Click { position: CENTER }).unwrap();

    assert_eq!(engine.tour_progress(), Some((1, 1)));
    assert!(engine.is_animating());
    let frame = settle(&mut engine);
    assert!(frame.effects.contains(&EngineEffect::ShowDetail { index: 0 }));
    assert!(frame.camera_moving);
    assert_eq!(engine.camera().eye, Vec3::Z + Vec3::splat(2.0));
    assert_eq!(engine.camera().target, Vec3::Z);
    assert!(!engine.is_animating());
    assert_eq!(engine.detail_panel().unwrap().1.title(), "front");
}

#[test]
fn marker_hover_switches_cursor_in_idle_only() {
    let mut engine = cube_engine();
    place(&mut engine, "front", Vec3::Z);

    engine
        .execute(ExhibitCommand::PointerMoved { position: CENTER })
        .unwrap();
    assert_eq!(engine.cursor(), CursorStyle::Pointer);
    engine
        .execute(ExhibitCommand::PointerMoved { position: CORNER })
        .unwrap();
    assert_eq!(engine.cursor(), CursorStyle::Default);

    engine.execute(ExhibitCommand::ToggleMeasuring).unwrap();
    engine
        .execute(ExhibitCommand::PointerMoved { position: CENTER })
        .unwrap();
    assert_eq!(engine.cursor(), CursorStyle::Crosshair);
}

#[test]
fn measuring_ignores_markers_and_publishes_distance() {
    let mut engine = cube_engine();
    place(&mut engine, "front", Vec3::Z);
    engine.execute(ExhibitCommand::ToggleMeasuring).unwrap();

    engine.execute(ExhibitCommand::Click { position: CENTER }).unwrap();
    assert_eq!(engine.tour_progress(), None);
    engine
        .execute(ExhibitCommand::Click {
            position: CENTER + Vec2::new(40.0, 0.0),
        })
        .unwrap();

    let distance = engine.measurement().distance().unwrap();
    assert!(distance > 0.0);
    let frame = engine.tick(Duration::ZERO);
    assert!(frame
        .effects
        .contains(&EngineEffect::MeasurementPublished { distance }));
    assert_eq!(
        engine.measurement_text(),
        Some(format!("{distance:.3}"))
    );
}

#[test]
fn third_measurement_click_is_rejected() {
    let mut engine = cube_engine();
    engine.execute(ExhibitCommand::ToggleMeasuring).unwrap();
    engine.execute(ExhibitCommand::Click { position: CENTER }).unwrap();
    engine.execute(ExhibitCommand::Click { position: CENTER }).unwrap();
    let before = engine.measurement().clone();

    assert_eq!(
        engine.execute(ExhibitCommand::Click { position: CENTER }),
        Err(InteractionError::MeasurementComplete)
    );
    assert_eq!(engine.measurement(), &before);

    engine.execute(ExhibitCommand::ToggleMeasuring).unwrap();
    assert!(engine.measurement().points().is_empty());
}

#[test]
fn tour_without_annotations_reports_message() {
    let mut engine = cube_engine();
    assert_eq!(
        engine.execute(ExhibitCommand::StartTour),
        Err(InteractionError::NoAnnotations)
    );
    assert_eq!(engine.tour_progress(), None);
    let frame = engine.tick(Duration::ZERO);
    assert!(frame
        .effects
        .iter()
        .any(|e| matches!(
            e,
            EngineEffect::Message(m) if m.contains("annotation")
        )));
}

#[test]
fn tour_walks_stops_and_stays_at_the_ends() {
    let mut engine = cube_engine();
    for (i, title) in ["a", "b", "c"].into_iter().enumerate() {
        place(&mut engine, title, Vec3::new(i as f32, 0.0, 1.0));
    }
    engine.execute(ExhibitCommand::StartTour).unwrap();
    engine.execute(ExhibitCommand::PrevStop).unwrap();
    assert_eq!(engine.tour_progress(), Some((1, 3)));
    engine.execute(ExhibitCommand::NextStop).unwrap();
    engine.execute(ExhibitCommand::NextStop).unwrap();
    engine.execute(ExhibitCommand::NextStop).unwrap();
    assert_eq!(engine.tour_progress(), Some((3, 3)));

    let _ = settle(&mut engine);
    assert_eq!(engine.camera().target, Vec3::new(2.0, 0.0, 1.0));

    engine.execute(ExhibitCommand::EndTour).unwrap();
    assert_eq!(engine.tour_progress(), None);
    assert!(engine.detail_panel().is_none());
    let frame = engine.tick(Duration::ZERO);
    assert_eq!(frame.effects.last(), Some(&EngineEffect::HideDetail));
}

#[test]
fn focus_out_of_range_is_rejected() {
    let mut engine = cube_engine();
    place(&mut engine, "a", Vec3::Z);
    assert_eq!(
        engine.execute(ExhibitCommand::FocusAnnotation { index: 1 }),
        Err(InteractionError::IndexOutOfRange { index: 1, len: 1 })
    );
    assert!(!engine.is_animating());
}

#[test]
fn deleting_focused_last_entry_clamps_tour() {
    let mut engine = cube_engine();
    for title in ["a", "b", "c"] {
        place(&mut engine, title, Vec3::Z);
    }
    engine
        .execute(ExhibitCommand::FocusAnnotation { index: 2 })
        .unwrap();
    let _ = engine.tick(Duration::ZERO);

    engine
        .execute(ExhibitCommand::DeleteAnnotation { index: 2 })
        .unwrap();
    assert_eq!(engine.tour_progress(), Some((2, 2)));
    let frame = engine.tick(Duration::ZERO);
    assert!(frame.effects.contains(&EngineEffect::ShowDetail { index: 1 }));
    let ordinals: Vec<_> =
        engine.annotations().iter().map(Annotation::ordinal).collect();
    assert_eq!(ordinals, vec![1, 2]);
}

#[test]
fn deleting_last_annotation_ends_tour() {
    let mut engine = cube_engine();
    place(&mut engine, "only", Vec3::Z);
    engine.execute(ExhibitCommand::StartTour).unwrap();
    engine
        .execute(ExhibitCommand::DeleteAnnotation { index: 0 })
        .unwrap();
    assert_eq!(engine.tour_progress(), None);
    let frame = engine.tick(Duration::ZERO);
    assert_eq!(frame.effects.last(), Some(&EngineEffect::HideDetail));
    assert!(frame.labels.is_empty());
}

#[test]
fn delete_out_of_range_is_rejected() {
    let mut engine = cube_engine();
    assert_eq!(
        engine.execute(ExhibitCommand::DeleteAnnotation { index: 0 }),
        Err(InteractionError::IndexOutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn escape_leaves_mode_then_tour() {
    let mut engine = cube_engine();
    place(&mut engine, "a", Vec3::Z);
    engine.execute(ExhibitCommand::StartTour).unwrap();
    engine.execute(ExhibitCommand::BeginPlacement).unwrap();

    engine.execute(ExhibitCommand::Cancel).unwrap();
    assert_eq!(engine.mode(), Mode::Idle);
    assert_eq!(engine.tour_progress(), Some((1, 1)));

    engine.execute(ExhibitCommand::Cancel).unwrap();
    assert_eq!(engine.tour_progress(), None);
}

#[test]
fn orbit_input_does_not_cancel_a_flight() {
    let mut engine = cube_engine();
    place(&mut engine, "a", Vec3::Z);
    engine
        .execute(ExhibitCommand::FocusAnnotation { index: 0 })
        .unwrap();
    let _ = engine.tick(Duration::from_millis(100));
    engine
        .execute(ExhibitCommand::RotateCamera {
            delta: Vec2::new(200.0, 0.0),
        })
        .unwrap();
    assert!(engine.is_animating());
    let _ = settle(&mut engine);
    assert_eq!(engine.camera().target, Vec3::Z);
}

#[test]
fn refocus_mid_flight_starts_from_live_pose() {
    let mut engine = cube_engine();
    place(&mut engine, "a", Vec3::Z);
    place(&mut engine, "b", Vec3::X);
    let start = engine.camera().eye;
    let first_stop = Vec3::Z + Vec3::splat(2.0);

    engine
        .execute(ExhibitCommand::FocusAnnotation { index: 0 })
        .unwrap();
    let _ = engine.tick(Duration::from_millis(100));
    let mid = engine.camera().eye;
    assert!((mid - start).length() > 1e-3);
    assert!((mid - first_stop).length() > 1e-3);

    engine
        .execute(ExhibitCommand::FocusAnnotation { index: 1 })
        .unwrap();
    let _ = engine.tick(Duration::ZERO);
    assert!(engine.is_animating());
    assert!((engine.camera().eye - mid).length() < 1e-5);

    let _ = settle(&mut engine);
    assert_eq!(engine.camera().target, Vec3::X);
}

#[test]
fn auto_rotate_spins_when_idle() {
    let mut engine = cube_engine();
    let before = engine.camera().eye;
    engine.execute(ExhibitCommand::ToggleAutoRotate).unwrap();
    let frame = engine.tick(Duration::from_millis(500));
    assert!(frame.camera_moving);
    assert_ne!(engine.camera().eye, before);
    assert!(engine.camera().target.length() < 1e-5);
}

#[test]
fn reset_view_flies_back_to_front() {
    let mut engine = cube_engine();
    let home = engine.camera().eye;
    engine
        .execute(ExhibitCommand::RotateCamera {
            delta: Vec2::new(300.0, 120.0),
        })
        .unwrap();
    engine.execute(ExhibitCommand::ResetView).unwrap();
    let _ = settle(&mut engine);
    assert!((engine.camera().eye - home).length() < 1e-3);
}

#[test]
fn host_commands_become_effects() {
    let mut engine = cube_engine();
    engine.execute(ExhibitCommand::TakeScreenshot).unwrap();
    engine.execute(ExhibitCommand::ToggleFullscreen).unwrap();
    let frame = engine.tick(Duration::ZERO);
    assert_eq!(
        frame.effects,
        vec![
            EngineEffect::ScreenshotRequested,
            EngineEffect::FullscreenToggled
        ]
    );
}

#[test]
fn resize_moves_labels() {
    let mut engine = cube_engine();
    place(&mut engine, "center", Vec3::ZERO);
    let before = engine.tick(Duration::ZERO).labels[0].screen;
    engine
        .execute(ExhibitCommand::Resize {
            width: 400,
            height: 300,
        })
        .unwrap();
    let after = engine.tick(Duration::ZERO).labels[0].screen;
    assert!((before - Vec2::new(400.0, 300.0)).length() < 1e-3);
    assert!((after - Vec2::new(200.0, 150.0)).length() < 1e-3);
}

#[test]
fn missing_file_fails_load_without_retry() {
    let mut engine = ExhibitEngine::new(Options::default(), 800, 600);
    engine
        .load_model("/nonexistent/vitrine/model.glb")
        .unwrap();
    let mut failed = None;
    for _ in 0..500 {
        let frame = engine.tick(Duration::ZERO);
        failed = frame.effects.into_iter().find_map(|e| match e {
            EngineEffect::ModelFailed(msg) => Some(msg),
            _ => None,
        });
        if failed.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(failed.is_some());
    assert!(matches!(engine.load_state(), LoadState::Failed(_)));
    assert!(engine.model().is_none());
}
