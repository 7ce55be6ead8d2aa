use crate::diagnostics::{Scope, ValidationError, E001, E011, E012, E013, E014};
use crate::models::Inventory;

/// Check required fields on every record of a built inventory.
///
/// Providers need a `TYPE`; servers need `PROVIDER`, `KIND`, `NAME`, and
/// `CONNECT_VIA`. Each missing field yields exactly one error. A server's
/// provider is not checked against the known providers.
#[must_use]
pub fn validate(inventory: &Inventory) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, provider) in &inventory.providers {
        if provider.provider_type.is_none() {
            errors.push(
                ValidationError::new(
                    Scope::Provider,
                    Some(name.as_str()),
                    E001,
                    format!("Provider {name} is missing TYPE"),
                )
                .with_field("TYPE"),
            );
        }
    }

    for (id, server) in &inventory.servers {
        let required = [
            ("PROVIDER", E011, &server.provider),
            ("KIND", E012, &server.kind),
            ("NAME", E013, &server.name),
            ("CONNECT_VIA", E014, &server.connect_via),
        ];
        for (field, code, value) in required {
            if value.is_none() {
                errors.push(
                    ValidationError::new(
                        Scope::Server,
                        Some(id.as_str()),
                        code,
                        format!("Server {id} is missing {field}"),
                    )
                    .with_field(field),
                );
            }
        }
    }

    errors
}
