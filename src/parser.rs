use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::diagnostics::{Scope, ValidationError, E010, E020};
use crate::errors::{InventoryError, Result};
use crate::models::{Inventory, Provider, Server};
use crate::tokenizer::parse_env_text;
use crate::validator::validate;

/// Conventional inventory file name.
pub const DEFAULT_FILE_NAME: &str = ".agent-devops.env";

const METADATA_PREFIX: &str = "AGENT_DEVOPS_";
const PROVIDER_PREFIX: &str = "PROVIDER_";
const SERVER_PREFIX: &str = "SERVER_";

/// Options controlling how tolerant parsing is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report `PROVIDER_`/`SERVER_` keys with fewer than three segments
    /// as `file`-scoped errors instead of skipping them silently.
    pub strict: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parse inventory text with default options.
///
/// Returns the inventory together with every conversion and
/// missing-field error. Parsing never fails.
#[must_use]
pub fn parse_inventory(text: &str) -> (Inventory, Vec<ValidationError>) {
    parse_inventory_with(text, &ParseOptions::default())
}

/// Full pipeline: tokenize → map keys onto records → validate.
#[must_use]
pub fn parse_inventory_with(
    text: &str,
    options: &ParseOptions,
) -> (Inventory, Vec<ValidationError>) {
    let env = parse_env_text(text);
    let (inventory, mut errors) = build_inventory(&env, options);
    errors.extend(validate(&inventory));

    tracing::debug!(
        providers = inventory.providers.len(),
        servers = inventory.servers.len(),
        errors = errors.len(),
        "parsed inventory"
    );

    (inventory, errors)
}

/// Map ordered key/value pairs onto an [`Inventory`].
///
/// Only conversion errors (and, in strict mode, malformed keys) are
/// returned here; missing required fields are reported by
/// [`validate`](crate::validator::validate).
#[must_use]
pub fn build_inventory(
    env: &IndexMap<String, String>,
    options: &ParseOptions,
) -> (Inventory, Vec<ValidationError>) {
    let mut inventory = Inventory::default();
    let mut errors = Vec::new();

    for (key, value) in env {
        if let Some(suffix) = key.strip_prefix(METADATA_PREFIX) {
            assign_metadata(&mut inventory, suffix, value);
        } else if key.starts_with(PROVIDER_PREFIX) {
            match split_record_key(key) {
                Some((name, field)) => assign_provider(&mut inventory, name, &field, value),
                None => malformed_key(key, options, &mut errors),
            }
        } else if key.starts_with(SERVER_PREFIX) {
            match split_record_key(key) {
                Some((id, field)) => {
                    assign_server(&mut inventory, id, &field, value, &mut errors);
                }
                None => malformed_key(key, options, &mut errors),
            }
        }
    }

    (inventory, errors)
}

/// Split `PREFIX_<id>_<FIELD...>` into `(id, FIELD...)`.
fn split_record_key(key: &str) -> Option<(&str, String)> {
    let parts: Vec<&str> = key.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    Some((parts[1], parts[2..].join("_")))
}

fn malformed_key(key: &str, options: &ParseOptions, errors: &mut Vec<ValidationError>) {
    tracing::debug!(key, "skipping malformed key");
    if options.strict {
        errors.push(ValidationError::new(
            Scope::File,
            Some(key),
            E020,
            format!("Malformed key {key}: expected <PREFIX>_<ID>_<FIELD>"),
        ));
    }
}

fn assign_metadata(inventory: &mut Inventory, suffix: &str, value: &str) {
    let metadata = &mut inventory.metadata;
    match suffix {
        "VERSION" => metadata.version = value.to_string(),
        "PROJECT" => metadata.project = Some(value.to_string()),
        "OWNER" => metadata.owner = Some(value.to_string()),
        "NOTES" => metadata.notes = Some(value.to_string()),
        _ => {
            metadata.extra.insert(suffix.to_string(), value.to_string());
        }
    }
}

fn assign_provider(inventory: &mut Inventory, name: &str, field: &str, value: &str) {
    let provider = inventory
        .providers
        .entry(name.to_string())
        .or_insert_with(|| {
            tracing::debug!(provider = name, "new provider");
            Provider::new(name)
        });

    let value = value.to_string();
    match field {
        "TYPE" => provider.provider_type = Some(value),
        "AUTH_METHOD" => provider.auth_method = Some(value),
        "AUTH_FILE" => provider.auth_file = Some(value),
        "DEFAULT_REGION" => provider.default_region = Some(value),
        "LABEL" => provider.label = Some(value),
        "NOTES" => provider.notes = Some(value),
        _ => {
            provider.extra.insert(field.to_string(), value);
        }
    }
}

fn assign_server(
    inventory: &mut Inventory,
    id: &str,
    field: &str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) {
    let server = inventory.servers.entry(id.to_string()).or_insert_with(|| {
        tracing::debug!(server = id, "new server");
        Server::new(id)
    });

    match field {
        "PROVIDER" => server.provider = Some(value.to_string()),
        "KIND" => server.kind = Some(value.to_string()),
        "NAME" => server.name = Some(value.to_string()),
        "CONNECT_VIA" => server.connect_via = Some(value.to_string()),
        "ENV" => server.env = Some(value.to_string()),
        "OS" => server.os = Some(value.to_string()),
        "ROLE" => server.role = Some(value.to_string()),
        "STATUS" => server.status = Some(value.to_string()),
        "TAGS" => server.tags = parse_tags(value),
        "HOST" => server.host = Some(value.to_string()),
        "PORT" => match value.parse::<i64>() {
            Ok(port) => server.port = Some(port),
            Err(_) => errors.push(
                ValidationError::new(
                    Scope::Server,
                    Some(id),
                    E010,
                    format!("Invalid PORT for server {id}: '{value}'"),
                )
                .with_field("PORT"),
            ),
        },
        "USER" => server.user = Some(value.to_string()),
        "SSH_KEY_PATH" => server.ssh_key_path = Some(value.to_string()),
        "NOTES" => server.notes = Some(value.to_string()),
        _ => {
            server.extra.insert(field.to_string(), value.to_string());
        }
    }
}

/// Split a comma-separated tag list, trimming entries and dropping empties.
fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Locate the inventory file for a path.
///
/// A directory resolves to [`DEFAULT_FILE_NAME`] inside it; any other
/// existing path is used as-is.
#[must_use]
pub fn find_inventory_file(path: &Path) -> Option<PathBuf> {
    if path.is_dir() {
        let candidate = path.join(DEFAULT_FILE_NAME);
        return candidate.is_file().then_some(candidate);
    }
    path.is_file().then(|| path.to_path_buf())
}

/// Read and parse an inventory file (or a directory containing one).
///
/// # Errors
///
/// Returns [`InventoryError::NotFound`] if no inventory file exists at the
/// resolved location, or an I/O error if it cannot be read.
pub fn read_inventory(
    path: &Path,
    options: &ParseOptions,
) -> Result<(Inventory, Vec<ValidationError>)> {
    let file = find_inventory_file(path).ok_or_else(|| InventoryError::NotFound {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(&file)?;
    Ok(parse_inventory_with(&text, options))
}
