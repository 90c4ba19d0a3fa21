// Shortcuts Config API
// Combination parsing and bindings files

pub mod combo_parser;
pub mod parser;

pub use combo_parser::{parse_combo_string, split_combination};
pub use parser::{BindingEntry, Config, ConfigError};
