use proptest::prelude::*;
use tl_chart::core::{format_dk, parse_dk};

proptest! {
    #[test]
    fn milepost_round_trip_property(value in 0u64..10_000_000_000) {
        let text = format_dk(value);
        prop_assert!(text.starts_with("DK"));
        prop_assert_eq!(parse_dk(&text).expect("formatted milepost parses"), value);
    }

    #[test]
    fn meter_part_is_below_one_kilometer(value in 0u64..10_000_000) {
        let text = format_dk(value);
        let meters: u64 = text
            .rsplit('-')
            .next()
            .and_then(|part| part.parse().ok())
            .expect("meter part");
        prop_assert!(meters < 1000);
    }
}
