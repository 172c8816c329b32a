use chrono::NaiveDate;
use hive_text::{row, Error, FieldValue};
use std::collections::BTreeMap;

#[test]
fn test_row_macro_empty() {
    assert_eq!(row!().unwrap(), b"\n");
}

#[test]
fn test_row_macro_scalars() {
    let line = row!["AA", 99, true, false].unwrap();
    assert_eq!(line, b"AA\x0199\x01TRUE\x01FALSE\x01\n");
}

#[test]
fn test_row_macro_trailing_comma() {
    assert_eq!(row!["x",].unwrap(), b"x\x01\n");
}

#[test]
fn test_row_macro_nulls() {
    let line = row![None::<i64>, (), Some("y")].unwrap();
    assert_eq!(line, b"\x01\x01y\x01\n");
}

#[test]
fn test_row_macro_collections() {
    let map = BTreeMap::from([("B1".to_string(), 4i64), ("B2".to_string(), 5)]);
    let line = row![map, vec![66i64, 77], vec!["CC", "DD"]].unwrap();
    assert_eq!(line, b"B1\x034\x02B2\x035\x0166\x0277\x01CC\x02DD\x01\n");
}

#[test]
fn test_row_macro_timestamp() {
    let ts = NaiveDate::from_ymd_opt(2014, 1, 2)
        .unwrap()
        .and_hms_milli_opt(3, 4, 5, 100)
        .unwrap();
    assert_eq!(row![ts].unwrap(), b"2014-01-02 03:04:05.1\x01\n");
}

#[test]
fn test_row_macro_escapes() {
    let line = row!["a\x01b", "c\\d"].unwrap();
    assert_eq!(line, b"a\\x01b\x01c\\\\d\x01\n");
}

#[test]
fn test_row_macro_unsupported() {
    let result = row![1, FieldValue::Unsupported("struct Point".to_string())];
    assert_eq!(
        result,
        Err(Error::UnsupportedType("struct Point".to_string()))
    );
}
