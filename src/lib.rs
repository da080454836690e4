pub use crate::errors::{combine, combine_all, FieldError, FormtreeError};
pub use crate::json::{to_json, update_values_from_json, ImportOptions};
pub use crate::parse::{parse, parse_update, parse_validate, Parser};
pub use crate::tree::{Attribute, FieldKind, Node, Path, Status};
pub use crate::update::{update, Msg};
pub use crate::value::{FileHandle, Value};

pub mod cli;
pub mod coerce;
pub mod errors;
pub mod json;
pub mod mask;
pub mod parse;
pub mod render;
pub mod tree;
pub mod update;
pub mod validation;
pub mod value;
