//! Randomised checks of the conversion properties

use automapper::Mappable;
use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

use crate::utils::engine;

#[derive(Debug, Clone, Default, PartialEq, Mappable)]
struct Dated {
    day: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Mappable)]
struct DatedText {
    day: String,
}

#[derive(Debug, Clone, Default, PartialEq, Mappable)]
struct Narrow {
    small: i16,
    whole: i32,
    real: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Mappable)]
struct Wide {
    small: i64,
    whole: f64,
    real: i32,
}

#[test]
fn test_date_text_round_trip() {
    let engine = engine();
    let to_text = engine.create_mapper::<Dated, DatedText>().unwrap();
    let to_date = engine.create_mapper::<DatedText, Dated>().unwrap();

    let epoch = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
    let mut rng = rand::rng();
    for _ in 0..500 {
        // Years 1..=9999 keep the four-digit pattern unambiguous
        let day = epoch + Duration::days(rng.random_range(0..3_652_058));
        assert!(day.year() <= 9999);

        let dated = Dated { day };
        let text = to_text.map(&dated).unwrap();
        assert_eq!(to_date.map(&text).unwrap(), dated, "via {}", text.day);
    }
}

#[test]
fn test_numeric_widening_and_truncation() {
    let engine = engine();
    let mapper = engine.create_mapper::<Narrow, Wide>().unwrap();

    let mut rng = rand::rng();
    for _ in 0..500 {
        let source = Narrow {
            small: rng.random(),
            whole: rng.random(),
            real: rng.random_range(-1.0e6..1.0e6),
        };
        let wide = mapper.map(&source).unwrap();

        assert_eq!(wide.small, i64::from(source.small));
        assert_eq!(wide.whole, f64::from(source.whole));
        assert_eq!(f64::from(wide.real), source.real.trunc());
    }
}
