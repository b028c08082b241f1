use laserconv_export::{render_dxf, render_svg};
use laserconv_formats::parse_geo;

// Coordinates chosen to be exactly representable so the emitted text
// can be compared literally.
const GEO_INPUT: &str = "\
#~31
P
1
0.5 0.25 0
|~
P
2
100.125 0.25 0
|~
P
3
100.125 50.75 0
|~
P
4
50.3125 0.25 0
|~
#~331
LIN
1 0
1 2
|~
LIN
3 0
2 3
|~
ARC
1 0
4 1 2
1
|~
#~END
";

#[test]
fn test_geo_to_dxf_preserves_endpoint_coordinates() {
    let model = parse_geo(GEO_INPUT).unwrap();
    let dxf = render_dxf(&model).unwrap();

    // Every segment endpoint must come through without precision loss.
    assert!(dxf.contains(" 10\n0.5\n 20\n0.25\n"));
    assert!(dxf.contains(" 11\n100.125\n 21\n0.25\n"));
    assert!(dxf.contains(" 10\n100.125\n 20\n0.25\n"));
    assert!(dxf.contains(" 11\n100.125\n 21\n50.75\n"));
}

#[test]
fn test_geo_to_dxf_colors_follow_class_markers() {
    let model = parse_geo(GEO_INPUT).unwrap();
    let dxf = render_dxf(&model).unwrap();

    // First LIN has parameter line "1 0" -> CUT -> color 7; second has
    // "3 0" -> ENGRAVE -> color 2.
    let line_records: Vec<&str> = dxf.split("  0\nLINE\n").skip(1).collect();
    assert_eq!(line_records.len(), 2);
    assert!(line_records[0].starts_with("  8\n0\n 62\n7\n"));
    assert!(line_records[1].starts_with("  8\n0\n 62\n2\n"));
}

#[test]
fn test_geo_to_dxf_arc_record() {
    let model = parse_geo(GEO_INPUT).unwrap();
    let dxf = render_dxf(&model).unwrap();

    // Arc center is point 4 at (50.3125, 0.25); start and end lie on
    // the same horizontal line, so the CCW sweep is 0..180 degrees.
    let arc_part = dxf.split("  0\nARC\n").nth(1).expect("one ARC entity");
    assert!(arc_part.contains(" 10\n50.3125\n 20\n0.25\n"));
    assert!(arc_part.contains(" 50\n180\n 51\n360\n"));
}

#[test]
fn test_geo_to_svg_strokes() {
    let model = parse_geo(GEO_INPUT).unwrap();
    let svg = render_svg(&model, 10.0).unwrap();

    assert!(svg.contains("x1=\"0.5\" y1=\"0.25\" x2=\"100.125\" y2=\"0.25\" stroke=\"black\""));
    assert!(svg.contains("x1=\"100.125\" y1=\"0.25\" x2=\"100.125\" y2=\"50.75\" stroke=\"yellow\""));
    assert!(svg.contains("<path d=\"M 0.5,0.25 A "));
}
