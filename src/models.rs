use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Open bag of unrecognized fields, keyed by field suffix.
pub type Extra = IndexMap<String, String>;

/// File-level metadata from `AGENT_DEVOPS_*` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: Extra,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            project: None,
            owner: None,
            notes: None,
            extra: Extra::new(),
        }
    }
}

/// A hosting account or environment, from `PROVIDER_<name>_*` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: Extra,
}

impl Provider {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A managed compute node or connection target, from `SERVER_<id>_*` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,

    /// Provider name. A lookup key, never checked against known providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_via: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: Extra,
}

impl Server {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if `tag` appears in this server's tag list.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The full model parsed from one inventory text.
///
/// Providers and servers iterate in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub metadata: Metadata,
    pub providers: IndexMap<String, Provider>,
    pub servers: IndexMap<String, Server>,
}

impl Inventory {
    /// Full keys of every unrecognized field, in metadata, provider, server order.
    ///
    /// These are the fields canonical serialization does not write back.
    #[must_use]
    pub fn extension_keys(&self) -> Vec<String> {
        let metadata = self
            .metadata
            .extra
            .keys()
            .map(|field| format!("AGENT_DEVOPS_{field}"));
        let providers = self.providers.values().flat_map(|p| {
            p.extra
                .keys()
                .map(move |field| format!("PROVIDER_{}_{field}", p.name))
        });
        let servers = self.servers.values().flat_map(|s| {
            s.extra
                .keys()
                .map(move |field| format!("SERVER_{}_{field}", s.id))
        });
        metadata.chain(providers).chain(servers).collect()
    }
}
