//! CLI output formatting module
//!
//! Commands return a value implementing [`CommandOutput`]; [`output`] prints it
//! as JSON or human text depending on the global `--json` flag.

pub mod progress;
pub mod table;

use serde::Serialize;

pub use table::TableFormatter;

/// Result of a command, printable for humans or as JSON
pub trait CommandOutput: Serialize {
    /// Terminal rendering
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print a command result in the selected mode
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}
