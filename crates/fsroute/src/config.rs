// File: src/config.rs
// Purpose: Build configuration mapping file names to node properties

use std::fs;
use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

/// Ordered list of file rules supplied by the caller
///
/// The router has no idea what a file "means"; the caller decides, e.g.
/// "`page.*` is a page component and makes its directory routable" or
/// "`middleware.*` stacks from the root down".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub rules: Vec<FileRule>,
}

/// One file rule. Only the first matching rule applies to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRule {
    /// Glob matched against the bare file name (`page.*`, `+layout.*`)
    pub pattern: String,

    /// Property key the file path is recorded under
    pub property: String,

    /// Append to an ordered stack instead of overwriting a single name
    #[serde(default = "default_false")]
    pub stack: bool,

    /// A match may terminate at a directory holding this file
    #[serde(default = "default_false")]
    pub accept: bool,
}

fn default_false() -> bool {
    false
}

impl FileRule {
    /// Rule recording a single file under `property`
    pub fn name(pattern: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            property: property.into(),
            stack: false,
            accept: false,
        }
    }

    /// Rule appending files to the `property` stack
    pub fn stack(pattern: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            stack: true,
            ..Self::name(pattern, property)
        }
    }

    /// Marks directories holding a matching file as acceptable
    pub fn accepting(mut self) -> Self {
        self.accept = true;
        self
    }
}

impl BuildConfig {
    pub fn new(rules: Vec<FileRule>) -> Self {
        Self { rules }
    }

    /// Appends a rule (lower priority than every rule already present)
    pub fn with_rule(mut self, rule: FileRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// App-router style conventions
    ///
    /// | file            | property     | kind  | accept |
    /// |-----------------|--------------|-------|--------|
    /// | `page.*`        | `page`       | name  | yes    |
    /// | `route.*`       | `route`      | name  | yes    |
    /// | `layout.*`      | `layouts`    | stack | no     |
    /// | `middleware.*`  | `middleware` | stack | no     |
    /// | `error.*`       | `error`      | name  | no     |
    /// | `loading.*`     | `loading`    | name  | no     |
    /// | `not-found.*`   | `not_found`  | name  | no     |
    pub fn app_router() -> Self {
        Self::new(vec![
            FileRule::name("page.*", "page").accepting(),
            FileRule::name("route.*", "route").accepting(),
            FileRule::stack("layout.*", "layouts"),
            FileRule::stack("middleware.*", "middleware"),
            FileRule::name("error.*", "error"),
            FileRule::name("loading.*", "loading"),
            FileRule::name("not-found.*", "not_found"),
        ])
    }

    /// Parses a TOML document with `[[rules]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| RouteError::Config(format!("failed to parse rules: {e}")))?;
        config.compile()?;
        Ok(config)
    }

    /// Loads rules from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Compiles every glob, failing on the first invalid pattern
    pub(crate) fn compile(&self) -> Result<Vec<CompiledRule<'_>>> {
        self.rules
            .iter()
            .map(|rule| {
                Pattern::new(&rule.pattern)
                    .map(|glob| CompiledRule { glob, rule })
                    .map_err(|e| {
                        RouteError::Config(format!("bad pattern {:?}: {e}", rule.pattern))
                    })
            })
            .collect()
    }
}

/// A rule with its glob compiled once per build
pub(crate) struct CompiledRule<'a> {
    glob: Pattern,
    pub rule: &'a FileRule,
}

/// First rule whose glob matches `file_name`
pub(crate) fn first_match<'a>(
    rules: &'a [CompiledRule<'a>],
    file_name: &str,
) -> Option<&'a FileRule> {
    rules
        .iter()
        .find(|compiled| compiled.glob.matches(file_name))
        .map(|compiled| compiled.rule)
}
