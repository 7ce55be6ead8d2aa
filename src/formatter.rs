//! Canonical inventory text: serialization, file formatting, and diffs.
//!
//! Output is grouped into METADATA, PROVIDERS, and SERVERS / NODES sections,
//! with records in the inventory's iteration order. Serialization is not a
//! strict inverse of parsing: extension fields are never written back, and
//! invalid records are filled in (`TYPE=other`, empty required server
//! fields). [`format_inventory`] reports both so callers can refuse a lossy
//! rewrite.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::diagnostics::ValidationError;
use crate::errors::{InventoryError, Result};
use crate::models::{Inventory, Metadata, Provider, Server};
use crate::parser::{find_inventory_file, parse_inventory, parse_inventory_with, ParseOptions};

const RULE: &str = "# =========================";

/// Provider type written when a provider has none.
pub const DEFAULT_PROVIDER_TYPE: &str = "other";

/// Result of formatting a single inventory file.
#[derive(Debug)]
pub struct FormatResult {
    /// The resolved inventory file.
    pub path: PathBuf,
    /// Whether the formatted content differs from the original.
    pub changed: bool,
    /// The original file content.
    pub original: String,
    /// The canonical content.
    pub content: String,
    /// Full keys of unrecognized fields the canonical content omits.
    pub dropped_keys: Vec<String>,
    /// Validation errors (strict mode) whose records the rewrite fills in or drops.
    pub errors: Vec<ValidationError>,
}

impl FormatResult {
    /// Returns `true` if writing `content` back would lose information.
    #[must_use]
    pub fn is_lossy(&self) -> bool {
        !self.dropped_keys.is_empty() || !self.errors.is_empty()
    }
}

/// Render an inventory as canonical `.env`-style text.
#[must_use]
pub fn serialize_inventory(inventory: &Inventory) -> String {
    let mut out = String::new();

    section(&mut out, "METADATA");
    write_metadata(&mut out, &inventory.metadata);
    out.push('\n');

    section(&mut out, "PROVIDERS");
    for provider in inventory.providers.values() {
        write_provider(&mut out, provider);
    }
    out.push('\n');

    section(&mut out, "SERVERS / NODES");
    for server in inventory.servers.values() {
        write_server(&mut out, server);
    }

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("{RULE}\n# {title}\n{RULE}\n"));
}

fn line(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{key}={value}\n"));
}

fn comment(out: &mut String, text: &str) {
    out.push_str(&format!("\n# {text}\n"));
}

fn optional(out: &mut String, key: &str, value: Option<&String>) {
    if let Some(value) = value {
        line(out, key, value);
    }
}

/// Comment heading for a record: its display name when set, else its id.
fn heading<'a>(display: Option<&'a String>, id: &'a str) -> &'a str {
    display.map(String::as_str).filter(|s| !s.is_empty()).unwrap_or(id)
}

fn write_metadata(out: &mut String, metadata: &Metadata) {
    line(out, "AGENT_DEVOPS_VERSION", &metadata.version);
    optional(out, "AGENT_DEVOPS_PROJECT", metadata.project.as_ref());
    optional(out, "AGENT_DEVOPS_OWNER", metadata.owner.as_ref());
    optional(out, "AGENT_DEVOPS_NOTES", metadata.notes.as_ref());
}

fn write_provider(out: &mut String, provider: &Provider) {
    let key = |field: &str| format!("PROVIDER_{}_{field}", provider.name);

    comment(out, heading(provider.label.as_ref(), &provider.name));
    line(
        out,
        &key("TYPE"),
        provider
            .provider_type
            .as_deref()
            .unwrap_or(DEFAULT_PROVIDER_TYPE),
    );
    optional(out, &key("AUTH_METHOD"), provider.auth_method.as_ref());
    optional(out, &key("AUTH_FILE"), provider.auth_file.as_ref());
    optional(out, &key("DEFAULT_REGION"), provider.default_region.as_ref());
    optional(out, &key("LABEL"), provider.label.as_ref());
    optional(out, &key("NOTES"), provider.notes.as_ref());
}

fn write_server(out: &mut String, server: &Server) {
    let key = |field: &str| format!("SERVER_{}_{field}", server.id);

    comment(out, heading(server.name.as_ref(), &server.id));
    // Always present, even when empty.
    line(out, &key("PROVIDER"), server.provider.as_deref().unwrap_or(""));
    line(out, &key("KIND"), server.kind.as_deref().unwrap_or(""));
    line(out, &key("NAME"), server.name.as_deref().unwrap_or(""));
    line(
        out,
        &key("CONNECT_VIA"),
        server.connect_via.as_deref().unwrap_or(""),
    );

    optional(out, &key("HOST"), server.host.as_ref());
    if let Some(port) = server.port {
        line(out, &key("PORT"), &port.to_string());
    }
    optional(out, &key("USER"), server.user.as_ref());
    optional(out, &key("SSH_KEY_PATH"), server.ssh_key_path.as_ref());
    optional(out, &key("ENV"), server.env.as_ref());
    optional(out, &key("OS"), server.os.as_ref());
    optional(out, &key("ROLE"), server.role.as_ref());
    optional(out, &key("STATUS"), server.status.as_ref());
    if !server.tags.is_empty() {
        line(out, &key("TAGS"), &server.tags.join(","));
    }
    optional(out, &key("NOTES"), server.notes.as_ref());
}

/// Re-serialize an inventory file canonically.
///
/// Returns a [`FormatResult`] indicating whether the file would change and
/// what the rewrite would lose. The file is parsed in strict mode so
/// malformed keys, which the rewrite drops, show up in `errors`. The caller
/// decides whether to write the result back to disk.
///
/// # Errors
///
/// Returns an error if no inventory file exists at `path` or it cannot be read.
pub fn format_inventory(path: &Path) -> Result<FormatResult> {
    let file = find_inventory_file(path).ok_or_else(|| InventoryError::NotFound {
        path: path.to_path_buf(),
    })?;
    let original = std::fs::read_to_string(&file)?;
    let (inventory, errors) = parse_inventory_with(&original, &ParseOptions::strict());
    let content = serialize_inventory(&inventory);
    let changed = content != original;

    Ok(FormatResult {
        path: file,
        changed,
        original,
        content,
        dropped_keys: inventory.extension_keys(),
        errors,
    })
}

/// Canonical form of inventory text (for testing without filesystem access).
#[must_use]
pub fn format_content(original: &str) -> String {
    let (inventory, _) = parse_inventory(original);
    serialize_inventory(&inventory)
}

/// Unified diff between the original and canonical content of a file.
#[must_use]
pub fn diff_inventory(result: &FormatResult, label: &str) -> String {
    TextDiff::from_lines(&result.original, &result.content)
        .unified_diff()
        .context_radius(3)
        .header(label, &format!("{label} (formatted)"))
        .to_string()
}
