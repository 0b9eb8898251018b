use egui::{Pos2, pos2};
use monoboard::svg::{self, PathIssue};
use monoboard::{PathError, Stroke, StrokeColor, Tool};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = StrokeColor> {
    prop_oneof![
        Just(StrokeColor::Black),
        Just(StrokeColor::White),
        Just(StrokeColor::Other("#1e88e5".to_owned())),
    ]
}

fn point() -> impl Strategy<Value = Pos2> {
    (-5000.0f32..5000.0, -5000.0f32..5000.0).prop_map(|(x, y)| pos2(x, y))
}

fn stroke() -> impl Strategy<Value = Stroke> {
    (color(), 0.1f32..64.0, prop::collection::vec(point(), 2..30)).prop_map(
        |(color, width, points)| Stroke::new(Tool::Pen, color, width, points).unwrap(),
    )
}

proptest! {
    #[test]
    fn test_decode_of_encode_is_identity(log in prop::collection::vec(stroke(), 0..12)) {
        let document = svg::encode(&log, 640, 480);
        let decoded = svg::decode(&document).unwrap();

        prop_assert!(decoded.issues.is_empty());
        prop_assert_eq!(decoded.strokes, log);
        prop_assert_eq!(decoded.width, Some(640));
        prop_assert_eq!(decoded.height, Some(480));
    }
}

#[test]
fn test_two_strokes_encode_in_order_and_decode_back() {
    let a = Stroke::new(Tool::Pen, StrokeColor::Black, 2.0, vec![pos2(0.0, 0.0), pos2(10.0, 10.0)]).unwrap();
    let b = Stroke::new(
        Tool::Pen,
        StrokeColor::White,
        4.0,
        vec![pos2(5.0, 5.0), pos2(15.0, 15.0), pos2(20.0, 5.0)],
    )
    .unwrap();

    let document = svg::encode(&[a.clone(), b.clone()], 100, 100);
    let paths: Vec<&str> = document.lines().filter(|line| line.starts_with("<path")).collect();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].contains(r#"d="M0,0 L10,10""#));
    assert!(paths[0].contains(r#"stroke="black""#));
    assert!(paths[1].contains(r#"d="M5,5 L15,15 L20,5""#));
    assert!(paths[1].contains(r#"stroke-width="4""#));

    let decoded = svg::decode(&document).unwrap();
    assert_eq!(decoded.strokes, vec![a, b]);
}

#[test]
fn test_curve_path_is_skipped_and_straight_path_recovered() {
    let document = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200">
        <path d="M10,10 C20,20 40,20 50,10" stroke="black" stroke-width="2" fill="none"/>
        <path d="M0,0 L30,40 L60,0" stroke="white" stroke-width="6" fill="none"/>
    </svg>"#;

    let decoded = svg::decode(document).unwrap();
    assert_eq!(decoded.strokes.len(), 1);
    let stroke = &decoded.strokes[0];
    assert_eq!(stroke.color(), &StrokeColor::White);
    assert_eq!(stroke.width(), 6.0);
    assert_eq!(stroke.points(), &[pos2(0.0, 0.0), pos2(30.0, 40.0), pos2(60.0, 0.0)]);

    assert_eq!(
        decoded.issues,
        vec![PathIssue {
            index: 0,
            error: PathError::UnsupportedCommand('C'),
            kept: false,
        }]
    );
}

#[test]
fn test_curve_after_lines_keeps_prefix() {
    let document = r#"<svg xmlns="http://www.w3.org/2000/svg">
        <path d="M0,0 L10,0 L10,10 Q20,20 30,10" stroke="black"/>
    </svg>"#;

    let decoded = svg::decode(document).unwrap();
    assert_eq!(decoded.strokes.len(), 1);
    assert_eq!(decoded.strokes[0].points().len(), 3);
    assert!(decoded.issues[0].kept);
}

#[test]
fn test_fused_and_separate_tokens_read_the_same() {
    let fused = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M100,100 L200,150" stroke="black"/></svg>"#;
    let separate = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 100 100 L 200 150" stroke="black"/></svg>"#;

    let fused = svg::decode(fused).unwrap().strokes;
    let separate = svg::decode(separate).unwrap().strokes;
    assert_eq!(fused, separate);
    assert_eq!(fused[0].points(), &[pos2(100.0, 100.0), pos2(200.0, 150.0)]);
}

#[test]
fn test_foreign_document_is_an_error() {
    assert!(svg::decode("<html><body/></html>").is_err());
    assert!(svg::decode("not xml at all").is_err());
}

#[test]
fn test_missing_attributes_use_defaults() {
    let document = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0 L1,1"/></svg>"#;
    let decoded = svg::decode(document).unwrap();
    assert_eq!(decoded.strokes[0].color(), &StrokeColor::Black);
    assert_eq!(decoded.strokes[0].width(), 2.0);
    assert_eq!(decoded.strokes[0].tool(), Tool::Pen);
}

#[test]
fn test_foreign_colour_with_whitespace_survives_save_and_load() {
    let document = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0 L1,1" stroke="&#9;red&#10;"/></svg>"#;
    let first = svg::decode(document).unwrap().strokes;
    assert_eq!(first[0].color(), &StrokeColor::Other("\tred\n".to_owned()));

    let again = svg::decode(&svg::encode(&first, 10, 10)).unwrap().strokes;
    assert_eq!(again, first);
}

#[test]
fn test_document_size_is_read_back() {
    let decoded = svg::decode(&svg::encode(&[], 320, 200)).unwrap();
    assert_eq!((decoded.width, decoded.height), (Some(320), Some(200)));
}
