use laserconv_export::render_dxf;
use laserconv_formats::{LstConfig, LstInterpreter};

const LST_INPUT: &str = "\
HEADER NOISE
START_TEXT
MSG(\"PART 1\")
G90
TC_LASER_ON(1, 0)
G01 X10 Y0
G01 X10 Y10
TC_LASER_OFF
TC_LASER_ON(3, 0)
G03 X0 Y10 I-5 J0
TC_LASER_OFF
STOP_TEXT
TRAILER NOISE
";

#[test]
fn test_lst_to_dxf_entities_and_colors() {
    let model = LstInterpreter::new(LstConfig::default())
        .interpret(LST_INPUT)
        .unwrap();
    let dxf = render_dxf(&model).unwrap();

    // Two cut lines (color 7), one engrave arc (color 2), plus the
    // synthetic closing segment back to the origin.
    assert_eq!(dxf.matches("  0\nLINE\n").count(), 3);
    assert_eq!(dxf.matches("  0\nARC\n").count(), 1);

    let arc_part = dxf.split("  0\nARC\n").nth(1).expect("one ARC entity");
    assert!(arc_part.starts_with("  8\n0\n 62\n2\n"));
    // Arc start (10,10), I-5 J0 -> center (5,10), radius 5.
    assert!(arc_part.contains(" 10\n5\n 20\n10\n"));
    assert!(arc_part.contains(" 40\n5\n"));
    // CCW half circle from 0 to 180 degrees.
    assert!(arc_part.contains(" 50\n0\n 51\n180\n"));
}

#[test]
fn test_lst_closing_segment_returns_to_origin() {
    let model = LstInterpreter::new(LstConfig::default())
        .interpret(LST_INPUT)
        .unwrap();

    // The arc ends at (0,10); the closing segment runs back to (0,0).
    let closing = model.segments.last().unwrap();
    assert_eq!(model.point(closing.start).unwrap().xy(), (0.0, 10.0));
    assert_eq!(model.point(closing.end).unwrap().xy(), (0.0, 0.0));
}
