//! Writing Hive text rows with the default delimiters.
//!
//! Run with: cargo run --example simple

use hive_text::{to_row, RowWriter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Typed writes, one field at a time
    let mut writer = RowWriter::new();
    writer.write_string("AA");
    writer.write_int(99);
    writer.write_str_int_map(&BTreeMap::from([("B1", 4i64), ("B2", 5)]));
    writer.write_int_array([66i64, 77]);
    writer.write_str_array(["CC", "DD"]);
    let row = writer.finish_row();
    println!("typed row: {:?}", String::from_utf8_lossy(&row));

    // Whole records through serde
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["admin".to_string()],
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            roles: vec![],
        },
    ];
    for user in &users {
        let row = to_row(user)?;
        println!("{:?}", String::from_utf8_lossy(&row));
    }

    Ok(())
}
