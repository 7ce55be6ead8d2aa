use crate::models::{Inventory, Server};

/// Equality filters for [`find_servers`]. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilter {
    pub env: Option<String>,
    pub role: Option<String>,
    pub provider: Option<String>,
    pub status: Option<String>,
    /// Matches when present anywhere in the server's tags.
    pub tag: Option<String>,
}

impl ServerFilter {
    #[must_use]
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns `true` if every set filter matches `server` exactly.
    #[must_use]
    pub fn matches(&self, server: &Server) -> bool {
        field_matches(self.env.as_ref(), server.env.as_ref())
            && field_matches(self.role.as_ref(), server.role.as_ref())
            && field_matches(self.provider.as_ref(), server.provider.as_ref())
            && field_matches(self.status.as_ref(), server.status.as_ref())
            && self.tag.as_ref().map_or(true, |tag| server.has_tag(tag))
    }
}

fn field_matches(wanted: Option<&String>, actual: Option<&String>) -> bool {
    match wanted {
        Some(wanted) => actual == Some(wanted),
        None => true,
    }
}

/// Servers matching `filter`, in inventory order.
#[must_use]
pub fn find_servers<'a>(inventory: &'a Inventory, filter: &ServerFilter) -> Vec<&'a Server> {
    inventory
        .servers
        .values()
        .filter(|server| filter.matches(server))
        .collect()
}
