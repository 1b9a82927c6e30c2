//! Output formatting helpers.

use anyhow::Result;
use serde::Serialize;

pub fn success(msg: &str) {
    println!("✓ {}", msg);
}

pub fn error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label, value);
}

pub fn json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a heading followed by a rule of the same width.
pub fn heading(title: &str) {
    println!("{}", title);
    println!("{}", "-".repeat(title.chars().count()));
}
