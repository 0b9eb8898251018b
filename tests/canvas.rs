use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, pos2, vec2};
use monoboard::{BoardApp, Config, panels};

fn frame(ctx: &egui::Context, app: &mut BoardApp, events: Vec<Event>) {
    let input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0))),
        events,
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| panels::central_panel(app, ctx));
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

fn app() -> (tempfile::TempDir, BoardApp) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        storage_dir: dir.path().to_owned(),
        export_dir: dir.path().to_owned(),
        ..Config::default()
    };
    (dir, BoardApp::with_config(config))
}

#[test]
fn test_idle_frames_during_drag_add_no_points() {
    let ctx = egui::Context::default();
    let (_dir, mut app) = app();

    // Lay out the canvas once so the pointer can hit it
    frame(&ctx, &mut app, vec![Event::PointerMoved(pos2(100.0, 100.0))]);
    frame(&ctx, &mut app, vec![button(pos2(100.0, 100.0), true)]);
    frame(&ctx, &mut app, vec![Event::PointerMoved(pos2(130.0, 130.0))]);
    frame(&ctx, &mut app, vec![Event::PointerMoved(pos2(160.0, 150.0))]);
    for _ in 0..10 {
        frame(&ctx, &mut app, Vec::new());
    }
    assert!(app.board().active_stroke().is_some());
    frame(&ctx, &mut app, vec![button(pos2(160.0, 150.0), false)]);

    let strokes = app.board().document().strokes();
    assert_eq!(strokes.len(), 1);
    let points = strokes[0].points();
    assert_eq!(points.first(), Some(&pos2(100.0, 100.0)));
    assert_eq!(points.last(), Some(&pos2(160.0, 150.0)));
    let repeats = points.windows(2).filter(|pair| pair[0] == pair[1]).count();
    assert_eq!(repeats, 0, "points: {:?}", points);
}

#[test]
fn test_click_without_move_commits_nothing() {
    let ctx = egui::Context::default();
    let (_dir, mut app) = app();

    frame(&ctx, &mut app, vec![Event::PointerMoved(pos2(50.0, 50.0))]);
    frame(&ctx, &mut app, vec![button(pos2(50.0, 50.0), true)]);
    frame(&ctx, &mut app, Vec::new());
    frame(&ctx, &mut app, vec![button(pos2(50.0, 50.0), false)]);
    frame(&ctx, &mut app, Vec::new());

    assert!(app.board().document().strokes().is_empty());
    assert!(app.board().active_stroke().is_none());
}
