//! The build-environment interface.
//!
//! The enclosing build tool owns the real environment object; slipway only
//! ever touches it through [`BuildEnvironment`]. The trait models a mapping
//! from a closed set of configuration keys to scalar-or-list values, plus a
//! side table of named builders and the list of artifacts registered on the
//! default build target.
//!
//! [`MemoryEnvironment`] is the in-memory adapter used by the CLI and tests.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::staging::StagingLayout;

/// A configuration value: either a bare string or an ordered list.
///
/// List keys stay lists across merges and appends. Scalar keys (the
/// shared-library flag family) are only ever replaced wholesale by the
/// platform mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Scalar(String),
    List(Vec<String>),
}

impl EnvValue {
    /// Create a scalar value.
    pub fn scalar(s: impl Into<String>) -> Self {
        EnvValue::Scalar(s.into())
    }

    /// Create a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnvValue::List(items.into_iter().map(|s| s.into()).collect())
    }

    /// View the value as a list, wrapping a scalar in a single element.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            EnvValue::Scalar(s) => vec![s.clone()],
            EnvValue::List(items) => items.clone(),
        }
    }

    /// The scalar payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            EnvValue::Scalar(s) => Some(s),
            EnvValue::List(_) => None,
        }
    }
}

/// The closed set of configuration keys slipway reads or writes.
///
/// Nothing in this crate touches a key outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigKey {
    /// Header search directories (`-I`)
    IncludePath,
    /// C/C++ compiler flags, including preprocessor defines
    CompilerFlags,
    /// C++-only compiler flags
    CxxFlags,
    /// Library search directories (`-L`)
    LibraryPath,
    /// Library names to link (`-l`, without the prefix)
    Libraries,
    /// Raw linker flags
    LinkFlags,
    /// Static archives referenced by absolute path
    StaticLibs,
    /// Shared-library C compile flags (scalar)
    SharedCcFlags,
    /// Shared-library C++ compile flags (scalar)
    SharedCxxFlags,
    /// Shared-library link flags (scalar)
    SharedLinkFlags,
    /// Shared-library filename suffix (scalar)
    SharedLibSuffix,
}

impl ConfigKey {
    /// Stable name, used for display and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::IncludePath => "include-path",
            ConfigKey::CompilerFlags => "compiler-flags",
            ConfigKey::CxxFlags => "c++-flags",
            ConfigKey::LibraryPath => "library-path",
            ConfigKey::Libraries => "libraries",
            ConfigKey::LinkFlags => "link-flags",
            ConfigKey::StaticLibs => "static-libs",
            ConfigKey::SharedCcFlags => "shared-cc-flags",
            ConfigKey::SharedCxxFlags => "shared-c++-flags",
            ConfigKey::SharedLinkFlags => "shared-link-flags",
            ConfigKey::SharedLibSuffix => "shared-lib-suffix",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named build rule in the environment's builder table.
///
/// Only the pieces slipway manipulates are modeled: the filename prefix
/// and suffix the rule stamps onto its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSpec {
    /// Filename prefix (e.g. `lib` for shared libraries)
    pub prefix: String,
    /// Filename suffix (e.g. `.so`)
    pub suffix: String,
}

impl BuilderSpec {
    /// Create a builder spec.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        BuilderSpec {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Copy of this spec with the filename prefix cleared.
    pub fn without_prefix(&self) -> Self {
        BuilderSpec {
            prefix: String::new(),
            suffix: self.suffix.clone(),
        }
    }
}

/// Name of the shared-library build rule seeded by the adapter.
pub const SHARED_LIBRARY_BUILDER: &str = "SharedLibrary";

/// Name of the Python-module build rule registered by the platform layer.
pub const PYMOD_BUILDER: &str = "Pymod";

/// Interface to the build tool's environment object.
pub trait BuildEnvironment {
    /// Read the current value for a key.
    fn get(&self, key: ConfigKey) -> Option<&EnvValue>;

    /// Replace the value for a key.
    fn set(&mut self, key: ConfigKey, value: EnvValue);

    /// Append values to a list key.
    ///
    /// An absent key becomes a list; a scalar is promoted to a list
    /// containing its old value before the new ones.
    fn append(&mut self, key: ConfigKey, values: Vec<String>);

    /// Look up a named builder.
    fn builder(&self, name: &str) -> Option<&BuilderSpec>;

    /// Register (or replace) a named builder.
    fn register_builder(&mut self, name: &str, spec: BuilderSpec);

    /// Record artifacts as belonging to the default build target.
    fn mark_default(&mut self, artifacts: &[PathBuf]);

    /// The staging layout, if one has been configured.
    fn staging(&self) -> Option<&StagingLayout>;

    /// Configure the staging layout.
    fn set_staging(&mut self, layout: StagingLayout);
}

/// In-memory `BuildEnvironment` adapter.
///
/// Seeds a `SharedLibrary` builder with Unix-style defaults, the way the
/// underlying tool would have before handing the environment to slipway.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    values: BTreeMap<ConfigKey, EnvValue>,
    builders: BTreeMap<String, BuilderSpec>,
    default_targets: Vec<PathBuf>,
    staging: Option<StagingLayout>,
}

impl MemoryEnvironment {
    /// Create an empty environment with the stock builder table.
    pub fn new() -> Self {
        let mut env = MemoryEnvironment::default();
        env.builders.insert(
            SHARED_LIBRARY_BUILDER.to_string(),
            BuilderSpec::new("lib", ".so"),
        );
        env
    }

    /// Artifacts registered on the default build target so far.
    pub fn default_targets(&self) -> &[PathBuf] {
        &self.default_targets
    }

    /// Iterate over all populated keys in key order.
    pub fn entries(&self) -> impl Iterator<Item = (ConfigKey, &EnvValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

impl BuildEnvironment for MemoryEnvironment {
    fn get(&self, key: ConfigKey) -> Option<&EnvValue> {
        self.values.get(&key)
    }

    fn set(&mut self, key: ConfigKey, value: EnvValue) {
        self.values.insert(key, value);
    }

    fn append(&mut self, key: ConfigKey, values: Vec<String>) {
        let list = match self.values.remove(&key) {
            None => values,
            Some(EnvValue::Scalar(s)) => {
                let mut list = vec![s];
                list.extend(values);
                list
            }
            Some(EnvValue::List(mut list)) => {
                list.extend(values);
                list
            }
        };
        self.values.insert(key, EnvValue::List(list));
    }

    fn builder(&self, name: &str) -> Option<&BuilderSpec> {
        self.builders.get(name)
    }

    fn register_builder(&mut self, name: &str, spec: BuilderSpec) {
        self.builders.insert(name.to_string(), spec);
    }

    fn mark_default(&mut self, artifacts: &[PathBuf]) {
        self.default_targets.extend_from_slice(artifacts);
    }

    fn staging(&self) -> Option<&StagingLayout> {
        self.staging.as_ref()
    }

    fn set_staging(&mut self, layout: StagingLayout) {
        self.staging = Some(layout);
    }
}
