// Parsing utilities
pub mod parsing;

// Slug handling
pub mod slug;

// URL handling utilities
pub mod url_builder;

// JSON utilities
pub mod json;

pub use parsing::{parse_csv_list, parse_flag, parse_leading_float};
pub use slug::{dashes_to_spaces, slugify, strip_state_suffix};
pub use url_builder::join_url;
pub use json::{is_truthy, value_to_short_string};
