//! Typed config document schema
//!
//! An envix config is a versioned document with optional includes and a list
//! of env sources. The same logical schema is accepted in TOML, YAML and JSON
//! (see [`crate::config::loader`]). `items` maps preserve declaration order
//! and reject duplicate keys at parse time.

use crate::domain::EnvName;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Top-level config document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvixConfig {
    /// Envix settings (schema version)
    pub envix: EnvixSection,

    /// Config paths to include before this file's own sources
    #[serde(default)]
    pub includes: Vec<PathBuf>,

    /// Environment variable sources, processed in order
    #[serde(default)]
    pub envs: Vec<EnvSource>,
}

impl EnvixConfig {
    /// Validates the parsed document
    ///
    /// The schema version is pinned to 1; any other value is rejected.
    pub fn validate(&self) -> Result<(), String> {
        if self.envix.version != 1 {
            return Err(format!(
                "Unsupported config version: {} (expected 1)",
                self.envix.version
            ));
        }
        Ok(())
    }
}

/// The `envix` section of a config document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvixSection {
    /// Schema version, pinned to 1
    pub version: u32,
}

fn default_overwrite() -> bool {
    true
}

/// One configured strategy for obtaining environment variable values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EnvSource {
    /// Literal values written directly in the config
    Raw(RawEnvs),

    /// Values read from local files (contents trimmed)
    File(FileEnvs),

    /// Values passed through from the existing process environment
    Local(LocalEnvs),

    /// Values fetched from Google Cloud Secret Manager
    GoogleCloudSecretManager(GoogleCloudSecretManagerEnvs),

    /// Values fetched from a Bitwarden vault
    Bitwarden(BitwardenEnvs),
}

impl EnvSource {
    /// Per-source policy on replacing already-set environment variables
    pub fn overwrite(&self) -> bool {
        match self {
            EnvSource::Raw(envs) => envs.overwrite,
            EnvSource::File(envs) => envs.overwrite,
            EnvSource::Local(envs) => envs.overwrite,
            EnvSource::GoogleCloudSecretManager(envs) => envs.overwrite,
            EnvSource::Bitwarden(envs) => envs.overwrite,
        }
    }

    /// Source variant name, as written in the config's `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            EnvSource::Raw(_) => "Raw",
            EnvSource::File(_) => "File",
            EnvSource::Local(_) => "Local",
            EnvSource::GoogleCloudSecretManager(_) => "GoogleCloudSecretManager",
            EnvSource::Bitwarden(_) => "Bitwarden",
        }
    }

    /// Number of configured items
    pub fn item_count(&self) -> usize {
        match self {
            EnvSource::Raw(envs) => envs.items.len(),
            EnvSource::File(envs) => envs.items.len(),
            EnvSource::Local(envs) => envs.items.pairs().len(),
            EnvSource::GoogleCloudSecretManager(envs) => envs.items.len(),
            EnvSource::Bitwarden(envs) => envs.items.len(),
        }
    }
}

/// Literal environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEnvs {
    /// Name → literal value
    pub items: Items<String>,

    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

/// Environment variables read from files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEnvs {
    /// Name → file path; the value is the trimmed file contents
    pub items: Items<PathBuf>,

    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

/// Environment variables passed through from the local environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalEnvs {
    /// Names to read, either a plain list or name → source-variable map
    pub items: LocalItems,

    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

/// Environment variables fetched from Google Cloud Secret Manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleCloudSecretManagerEnvs {
    /// Google Cloud project id
    pub project_id: String,

    /// Name → secret version reference
    pub items: Items<SecretRef>,

    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl GoogleCloudSecretManagerEnvs {
    /// Expands each item to its full secret version resource name
    pub fn secret_items(&self) -> Vec<(EnvName, String)> {
        self.items
            .iter()
            .map(|(name, secret)| (name.clone(), secret.resource_name(&self.project_id)))
            .collect()
    }
}

/// Environment variables fetched from a Bitwarden vault
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BitwardenEnvs {
    /// Name → vault item/field reference
    pub items: Items<VaultRef>,

    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

/// Items of a Local source: a list of names or a name → source-variable map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalItems {
    /// List form: the key itself names the local variable to read
    Names(Vec<EnvName>),

    /// Map form: the value names the local variable, optionally `$`-prefixed
    Mapping(Items<LocalRef>),
}

impl LocalItems {
    /// Resolves both forms to (target name, source variable name) pairs
    pub fn pairs(&self) -> Vec<(EnvName, String)> {
        match self {
            LocalItems::Names(names) => names
                .iter()
                .map(|name| (name.clone(), name.as_str().to_string()))
                .collect(),
            LocalItems::Mapping(items) => items
                .iter()
                .map(|(name, envvar)| (name.clone(), envvar.target().to_string()))
                .collect(),
        }
    }
}

fn local_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\$?[A-Za-z_][A-Za-z0-9_]*$").expect("valid pattern"))
}

/// Reference to a local environment variable, optionally written as `$NAME`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalRef(String);

impl LocalRef {
    /// Creates a reference, validating the `$`-optional name pattern
    pub fn new(reference: impl Into<String>) -> Result<Self, String> {
        let reference = reference.into();
        if !local_ref_pattern().is_match(&reference) {
            return Err(format!("Invalid environment variable reference: {reference}"));
        }
        Ok(Self(reference))
    }

    /// The referenced variable name with any leading `$` stripped
    pub fn target(&self) -> &str {
        self.0.trim_start_matches('$')
    }
}

impl<'de> Deserialize<'de> for LocalRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let reference = String::deserialize(deserializer)?;
        LocalRef::new(reference).map_err(serde::de::Error::custom)
    }
}

fn secret_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^secrets/\w+/versions/([0-9]+|latest)$").expect("valid pattern")
    })
}

/// Reference to a Google Cloud secret version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecretRef {
    /// Shorthand string form: `secrets/<id>/versions/<n|latest>`
    Path(SecretPath),

    /// Expanded form with an explicit id and version
    Entry(SecretEntry),
}

impl SecretRef {
    /// Full resource name: `projects/<project_id>/secrets/<id>/versions/<v>`
    pub fn resource_name(&self, project_id: &str) -> String {
        match self {
            SecretRef::Path(path) => format!("projects/{project_id}/{}", path.0),
            SecretRef::Entry(entry) => format!(
                "projects/{project_id}/secrets/{}/versions/{}",
                entry.secret_id, entry.version
            ),
        }
    }
}

/// Validated `secrets/<id>/versions/<n|latest>` shorthand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretPath(String);

impl SecretPath {
    pub fn new(path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        if !secret_path_pattern().is_match(&path) {
            return Err(format!(
                "Invalid secret reference: {path} (expected secrets/<id>/versions/<n|latest>)"
            ));
        }
        Ok(Self(path))
    }
}

impl<'de> Deserialize<'de> for SecretPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let path = String::deserialize(deserializer)?;
        SecretPath::new(path).map_err(serde::de::Error::custom)
    }
}

/// Expanded secret reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretEntry {
    pub secret_id: String,

    #[serde(default)]
    pub version: SecretVersion,
}

/// Secret version selector: a positive integer or `latest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretVersion {
    Latest,
    Number(u64),
}

impl Default for SecretVersion {
    fn default() -> Self {
        SecretVersion::Latest
    }
}

impl fmt::Display for SecretVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretVersion::Latest => write!(f, "latest"),
            SecretVersion::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for SecretVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SecretVersion::Latest => serializer.serialize_str("latest"),
            SecretVersion::Number(n) => serializer.serialize_u64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for SecretVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = SecretVersion;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a positive integer or the string \"latest\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value == "latest" {
                    Ok(SecretVersion::Latest)
                } else {
                    Err(E::custom(format!("Invalid secret version: {value}")))
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value >= 1 {
                    Ok(SecretVersion::Number(value))
                } else {
                    Err(E::custom("Secret version must be >= 1"))
                }
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(value)
                    .map_err(|_| E::custom("Secret version must be >= 1"))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(VersionVisitor)
    }
}

fn vault_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^items/\w+/fields/\w+$").expect("valid pattern"))
}

/// Reference to a Bitwarden item field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VaultRef {
    /// Shorthand string form: `items/<id>/fields/<id>`
    Path(VaultPath),

    /// Expanded form with explicit ids
    Entry { item_id: String, field_id: String },
}

impl VaultRef {
    pub fn item_id(&self) -> &str {
        match self {
            VaultRef::Path(path) => path.segment(1),
            VaultRef::Entry { item_id, .. } => item_id,
        }
    }

    pub fn field_id(&self) -> &str {
        match self {
            VaultRef::Path(path) => path.segment(3),
            VaultRef::Entry { field_id, .. } => field_id,
        }
    }
}

/// Validated `items/<id>/fields/<id>` shorthand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultPath(String);

impl VaultPath {
    pub fn new(path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        if !vault_path_pattern().is_match(&path) {
            return Err(format!(
                "Invalid Bitwarden reference: {path} (expected items/<id>/fields/<id>)"
            ));
        }
        Ok(Self(path))
    }

    fn segment(&self, index: usize) -> &str {
        // Pattern validation guarantees four segments.
        self.0.split('/').nth(index).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for VaultPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let path = String::deserialize(deserializer)?;
        VaultPath::new(path).map_err(serde::de::Error::custom)
    }
}

/// Ordered `items` map with duplicate-key rejection
///
/// Keys keep their declaration order across TOML, YAML and JSON inputs, which
/// fixes the iteration order of the aggregated result.
#[derive(Debug, Clone, PartialEq)]
pub struct Items<V> {
    entries: Vec<(EnvName, V)>,
}

impl<V> Items<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, rejecting duplicate keys
    pub fn insert(&mut self, name: EnvName, value: V) -> Result<(), String> {
        if self.entries.iter().any(|(n, _)| *n == name) {
            return Err(format!("Duplicate items key: {name}"));
        }
        self.entries.push((name, value));
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EnvName, &V)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Items<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for Items<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Items<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ItemsVisitor<V>(std::marker::PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for ItemsVisitor<V> {
            type Value = Items<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of environment variable names")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut items = Items::new();
                while let Some((name, value)) = access.next_entry::<EnvName, V>()? {
                    items
                        .insert(name, value)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(items)
            }
        }

        deserializer.deserialize_map(ItemsVisitor(std::marker::PhantomData))
    }
}
