use tl_chart::ChartError;
use tl_chart::core::{format_dk, format_dk_value, parse_dk};

#[test]
fn formats_known_values() {
    assert_eq!(format_dk(300), "DK0-300");
    assert_eq!(format_dk(2300), "DK2-300");
    assert_eq!(format_dk(5300), "DK5-300");
    assert_eq!(format_dk(1000), "DK1-0");
}

#[test]
fn parses_known_values() {
    assert_eq!(parse_dk("DK0-300").expect("parse"), 300);
    assert_eq!(parse_dk("DK5-300").expect("parse"), 5300);
    assert_eq!(parse_dk("DK2-5").expect("parse"), 2005);
}

#[test]
fn malformed_text_is_an_invalid_milepost() {
    let err = parse_dk("KM5-300").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidMilepost(text) if text == "KM5-300"));
}

#[test]
fn overflowing_kilometers_are_rejected() {
    let text = format!("DK{}-0", u64::MAX);
    assert!(parse_dk(&text).is_err());
}

#[test]
fn readout_floors_fractional_values() {
    assert_eq!(format_dk_value(350.0).as_deref(), Some("DK0-350"));
    assert_eq!(format_dk_value(2300.75).as_deref(), Some("DK2-300"));
    assert_eq!(format_dk_value(f64::INFINITY), None);
}
