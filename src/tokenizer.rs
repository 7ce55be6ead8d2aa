use indexmap::IndexMap;

/// Split `.env`-style text into ordered `KEY -> value` pairs.
///
/// Blank lines, `#` comments, lines without `=`, and lines with an empty
/// key are ignored. The line is split on the first `=` and both sides are
/// trimmed. A repeated key overwrites the earlier value but keeps its
/// original position. There is no quoting, escaping, or multi-line support.
#[must_use]
pub fn parse_env_text(text: &str) -> IndexMap<String, String> {
    let mut env = IndexMap::new();

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::trace!(line = lineno + 1, "ignoring line without '='");
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            tracing::trace!(line = lineno + 1, "ignoring line with empty key");
            continue;
        }

        env.insert(key.to_string(), value.trim().to_string());
    }

    env
}
