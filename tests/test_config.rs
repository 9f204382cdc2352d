use target_range::config::parse_fps;

#[test]
fn fps_defaults_to_sixty() {
    assert_eq!(parse_fps(None), 60);
    assert_eq!(parse_fps(Some("")), 60);
    assert_eq!(parse_fps(Some("fast")), 60);
}

#[test]
fn fps_accepts_range() {
    assert_eq!(parse_fps(Some("30")), 30);
    assert_eq!(parse_fps(Some(" 120 ")), 120);
    assert_eq!(parse_fps(Some("1")), 1);
    assert_eq!(parse_fps(Some("240")), 240);
}

#[test]
fn fps_out_of_range_falls_back() {
    assert_eq!(parse_fps(Some("0")), 60);
    assert_eq!(parse_fps(Some("241")), 60);
    assert_eq!(parse_fps(Some("-5")), 60);
}
