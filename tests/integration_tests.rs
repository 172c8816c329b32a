use chrono::{FixedOffset, NaiveDate, TimeZone};
use hive_text::{escape_rune, to_row, Delimiters, Error, FieldValue, RowWriter};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Debug)]
struct PageView {
    url: String,
    user_id: i64,
    duration_ms: u32,
    bounced: bool,
    score: f64,
    tags: Vec<String>,
    counters: IndexMap<String, i64>,
    referrer: Option<String>,
}

fn page_view() -> PageView {
    let mut counters = IndexMap::new();
    counters.insert("clicks".to_string(), 3);
    counters.insert("scrolls".to_string(), -1);
    PageView {
        url: "https://example.com/a\\b".to_string(),
        user_id: -42,
        duration_ms: 1500,
        bounced: false,
        score: 0.25,
        tags: vec!["home".to_string(), "mobile".to_string()],
        counters,
        referrer: None,
    }
}

#[test]
fn test_default_delimiter_row() {
    // Maps are unordered, so both entry orders are accepted.
    let expected1: &[u8] = b"AA\x0199\x01B1\x034\x02B2\x035\x0166\x0277\x01CC\x02DD\x01\n";
    let expected2: &[u8] = b"AA\x0199\x01B2\x035\x02B1\x034\x0166\x0277\x01CC\x02DD\x01\n";

    let mut writer = RowWriter::new();
    writer.write_string("AA");
    writer.write_int(99);
    let map: HashMap<&str, i64> = HashMap::from([("B1", 4), ("B2", 5)]);
    writer.write_str_int_map(&map);
    writer.write_int_array([66i64, 77]);
    writer.write_str_array(["CC", "DD"]);
    let out = writer.finish_row();

    assert!(
        out == expected1 || out == expected2,
        "Neither expected output matched: {:?}",
        String::from_utf8_lossy(&out)
    );
    assert!(out.ends_with(b"CC\x02DD\x01\n"));
}

#[test]
fn test_csv_style_row() {
    let mut writer = RowWriter::new();
    writer.set_delimiters(b',', b';', b':', b'\n').unwrap();
    writer.write_string("['\x01'\x02\x03,;:\\]");
    writer.write_int_array([1i64, 2, 3]);
    writer.write_str_int_map(HashMap::from([("key", 1i64)]));
    assert_eq!(
        writer.finish_row(),
        b"['\x01'\x02\x03\\,\\;\\:\\\\],1;2;3,key:1,\n"
    );
}

#[test]
fn test_struct_row() {
    let row = to_row(&page_view()).unwrap();
    assert_eq!(
        row,
        b"https://example.com/a\\\\b\x01-42\x011500\x01FALSE\x010.250000\x01home\x02mobile\x01clicks\x033\x02scrolls\x03-1\x01\x01\n"
    );
}

#[test]
fn test_writer_reuse_across_rows() {
    let mut writer = RowWriter::new();
    let rows: Vec<Vec<u8>> = (0..3)
        .map(|i| {
            writer.write_int(i);
            writer.write_string("x");
            writer.finish_row()
        })
        .collect();
    assert_eq!(rows[0], b"0\x01x\x01\n");
    assert_eq!(rows[1], b"1\x01x\x01\n");
    assert_eq!(rows[2], b"2\x01x\x01\n");
}

#[test]
fn test_reset_matches_fresh_writer() {
    let mut reused = RowWriter::new();
    reused.write_string("partial");
    reused.write_int(1);
    reused.reset();
    assert!(reused.is_empty());
    reused.write_string("full");
    reused.write_bool(true);
    let reused_row = reused.finish_row();

    let mut fresh = RowWriter::new();
    fresh.write_string("full");
    fresh.write_bool(true);
    assert_eq!(reused_row, fresh.finish_row());
}

#[test]
fn test_reset_unlocks_delimiters() {
    let mut writer = RowWriter::new();
    writer.write_string("partial");
    assert_eq!(
        writer.set_delimiters(b'|', b',', b'=', b'\n'),
        Err(Error::AlreadyWriting)
    );
    assert_eq!(writer.delimiters(), Delimiters::default());

    writer.reset();
    writer.set_delimiters(b'|', b',', b'=', b'\n').unwrap();
    writer.write_string("a|b");
    assert_eq!(writer.finish_row(), b"a\\|b|\n");
}

#[test]
fn test_invalid_delimiters_keep_config() {
    let mut writer = RowWriter::new();
    writer.set_delimiters(b',', b';', b':', b'\n').unwrap();
    for bad in [b'a', b'z', b'0', b'9', b'U', b'\\', 0x80, 0xff] {
        let err = writer.set_delimiters(bad, b';', b':', b'\n').unwrap_err();
        assert_eq!(
            err,
            Error::InvalidDelimiter {
                role: "field",
                escaped: escape_rune(i32::from(bad)),
            }
        );
        assert_eq!(writer.delimiters().as_bytes(), *b",;:\n");
    }
}

#[test]
fn test_duplicate_delimiters() {
    let mut writer = RowWriter::new();
    let cases = [
        [b',', b',', b':', b'\n'],
        [b',', b';', b',', b'\n'],
        [b',', b';', b':', b','],
        [b',', b';', b';', b'\n'],
        [b',', b';', b':', b';'],
        [b',', b';', b'\n', b'\n'],
    ];
    for [field, item, key, line] in cases {
        assert!(matches!(
            writer.set_delimiters(field, item, key, line),
            Err(Error::DuplicateDelimiter { .. })
        ));
    }
    assert_eq!(writer.delimiters(), Delimiters::default());
}

#[test]
fn test_empty_row_is_terminator() {
    let mut writer = RowWriter::new();
    assert_eq!(writer.finish_row(), b"\n");

    writer.set_delimiters(b',', b';', b':', b'\r').unwrap();
    assert_eq!(writer.finish_row(), b"\r");
}

#[test]
fn test_line_terminator_escaped_in_content() {
    let mut writer = RowWriter::new();
    writer.write_string("two\nlines\r\n");
    assert_eq!(writer.finish_row(), b"two\\nlines\r\\n\x01\n");
}

#[test]
fn test_non_ascii_passes_through() {
    let mut writer = RowWriter::new();
    writer.write_string("naïve café ✓");
    assert_eq!(writer.finish_row(), "naïve café ✓\x01\n".as_bytes());
}

#[test]
fn test_generic_fields() {
    let mut writer = RowWriter::new();
    writer.write_field(5.5).unwrap();
    writer.write_field(i8::MIN).unwrap();
    writer.write_field(u64::MAX).unwrap();
    writer.write_field(None::<String>).unwrap();
    let mut uints = IndexMap::new();
    uints.insert("a".to_string(), 1u64);
    writer.write_field(uints).unwrap();
    assert_eq!(
        writer.finish_row(),
        b"5.500000\x01-128\x0118446744073709551615\x01\x01a\x031\x01\n"
    );
}

#[test]
fn test_generic_unsupported_leaves_buffer() {
    let mut writer = RowWriter::new();
    writer.write_string("keep");
    let len = writer.len();
    let result = writer.write_field(FieldValue::Unsupported("complex<128>".to_string()));
    assert!(result.is_err());
    assert_eq!(writer.len(), len);
    assert_eq!(writer.finish_row(), b"keep\x01\n");
}

#[test]
fn test_timestamps() {
    let naive = NaiveDate::from_ymd_opt(2014, 1, 2)
        .unwrap()
        .and_hms_nano_opt(3, 4, 5, 666_666_666)
        .unwrap();
    let mut writer = RowWriter::new();
    writer.write_timestamp(&naive);
    assert_eq!(writer.finish_row(), b"2014-01-02 03:04:05.666666666\x01\n");

    // Offsets keep the wall-clock time of their own zone.
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let zoned = offset.from_local_datetime(&naive).unwrap();
    writer.write_field(zoned).unwrap();
    assert_eq!(writer.finish_row(), b"2014-01-02 03:04:05.666666666\x01\n");

    let whole = NaiveDate::from_ymd_opt(1999, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    writer.write_field(whole).unwrap();
    assert_eq!(writer.finish_row(), b"1999-12-31 23:59:59\x01\n");
}

#[test]
fn test_timestamp_escaped_with_colon_delimiter() {
    let mut writer = RowWriter::new();
    writer.set_delimiters(b'\t', b',', b':', b'\n').unwrap();
    let ts = NaiveDate::from_ymd_opt(2020, 2, 29)
        .unwrap()
        .and_hms_micro_opt(12, 0, 1, 10)
        .unwrap();
    writer.write_timestamp(&ts);
    assert_eq!(writer.finish_row(), b"2020-02-29 12\\:00\\:01.00001\t\n");
}

#[test]
fn test_write_bytes() {
    let mut writer = RowWriter::new();
    writer.write_bytes(b"raw\\\x01\xc3");
    assert_eq!(writer.finish_row(), b"raw\\\\\\x01\xc3\x01\n");
}
