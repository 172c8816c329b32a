/// Builds a finished row with the default delimiters.
///
/// Each argument goes through [`FieldValue::from`](crate::FieldValue), so
/// anything with a `From` conversion works. Evaluates to
/// `Result<Vec<u8>, Error>`.
///
/// ```rust
/// use hive_text::row;
///
/// let line = row!["AA", 99, true, None::<i32>].unwrap();
/// assert_eq!(line, b"AA\x0199\x01TRUE\x01\x01\n");
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::result::Result::<_, $crate::Error>::Ok($crate::RowWriter::new().finish_row())
    };

    ($($field:expr),+ $(,)?) => {{
        let mut writer = $crate::RowWriter::new();
        (|| -> $crate::Result<::std::vec::Vec<u8>> {
            $(
                writer.write_field($crate::FieldValue::from($field))?;
            )+
            ::std::result::Result::Ok(writer.finish_row())
        })()
    }};
}
