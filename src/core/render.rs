//! Output renderers for the aggregated secrets
//!
//! Both renderers iterate the mapping in insertion order and leave it
//! untouched. Dotenv output quotes a value only when it contains characters a
//! shell would interpret.

use crate::domain::result::Result;
use crate::domain::{EnvixError, Secrets};
use secrecy::ExposeSecret;
use std::borrow::Cow;

/// Renders `NAME=value` lines, one per secret, shell-quoted where needed
pub fn render_dotenv(secrets: &Secrets) -> String {
    let mut output = String::new();
    for (name, value) in secrets.iter() {
        output.push_str(name.as_str());
        output.push('=');
        output.push_str(&shell_quote(value.expose_secret().as_ref()));
        output.push('\n');
    }
    output
}

/// Renders a flat `{name: value}` JSON object
pub fn render_json(secrets: &Secrets) -> Result<String> {
    let mut map = serde_json::Map::new();
    for (name, value) in secrets.iter() {
        map.insert(
            name.as_str().to_string(),
            serde_json::Value::from(value.expose_secret().as_ref()),
        );
    }
    serde_json::to_string(&map).map_err(|e| EnvixError::Serialization(e.to_string()))
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '@' | '%' | '+' | ',' | '=')
}

/// Quotes a value for a dotenv line
///
/// Values made only of shell-safe characters pass through unquoted; anything
/// else is single-quoted, with embedded single quotes escaped as `'\''`.
fn shell_quote(value: &str) -> Cow<'_, str> {
    if !value.is_empty() && value.chars().all(is_shell_safe) {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}
