pub mod diagnostics;
pub mod errors;
pub mod formatter;
pub mod models;
pub mod parser;
pub mod query;
pub mod tokenizer;
pub mod validator;

// Re-export key types at crate root for convenience.
pub use diagnostics::{Scope, ValidationError};
pub use errors::{InventoryError, Result};
pub use formatter::{
    diff_inventory, format_content, format_inventory, serialize_inventory, FormatResult,
};
pub use models::{Inventory, Metadata, Provider, Server};
pub use parser::{
    build_inventory, find_inventory_file, parse_inventory, parse_inventory_with, read_inventory,
    ParseOptions, DEFAULT_FILE_NAME,
};
pub use query::{find_servers, ServerFilter};
pub use tokenizer::parse_env_text;
pub use validator::validate;
