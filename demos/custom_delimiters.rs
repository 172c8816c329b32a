//! Using CSV-like delimiters and seeing how content gets escaped.
//!
//! Run with: cargo run --example custom_delimiters

use hive_text::{Delimiters, RowWriter};
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    let delimiters = Delimiters::new()
        .with_field(b',')
        .with_item(b';')
        .with_map_key(b':');
    let mut writer = RowWriter::with_delimiters(delimiters)?;

    let mut out = std::io::stdout().lock();

    writer.write_string("plain");
    writer.write_string("needs, escaping; here: \\");
    writer.write_int_array([1i64, 2, 3]);
    writer.write_str_int_map([("key", 1i64)]);
    out.write_all(&writer.finish_row())?;

    // Rejected: 'n' would be ambiguous with the escaped newline
    if let Err(e) = writer.set_delimiters(b'n', b';', b':', b'\n') {
        println!("rejected: {}", e);
    }

    // Rejected: delimiters are locked once a row has started
    writer.write_null();
    if let Err(e) = writer.set_delimiters(b'|', b';', b':', b'\n') {
        println!("rejected: {}", e);
    }
    writer.reset();
    writer.set_delimiters(b'|', b';', b':', b'\n')?;
    writer.write_string("a|b");
    out.write_all(&writer.finish_row())?;

    Ok(())
}
