//! Configuration management for the Chai website.
//!
//! Parses `chai-site.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `exercises.base_url`
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "${CHAI_HOST:-127.0.0.1}"
//! port = 8080
//!
//! [site]
//! title = "chai-lang.dev"
//! dir = "site"
//!
//! [[groups]]
//! slug = "book"
//! name = "The Chai Book"
//!
//! [[groups]]
//! slug = "tour"
//! name = "Tour"
//! layout = "nested"
//! file = "lesson.md"
//! route = "/tour"
//! template = "tour.html"
//! attachments = ["template.chai", "solution.chai", "output.txt"]
//!
//! [[pages]]
//! route = "/"
//! title = "chai-lang.dev"
//! view = "index.html"
//! style = "index.scss"
//! ```

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the site directory.
    pub site_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "chai-site.toml";

/// Prefix of static assets and compiled stylesheets.
pub const STATIC_ROUTE: &str = "/static";

/// Guide exercise API endpoint.
pub const EXERCISE_ROUTE: &str = "/api/guide/exercise";

/// Raw solution files for guide exercises.
const DEFAULT_EXERCISES_BASE_URL: &str =
    "https://raw.githubusercontent.com/ComedicChimera/chai/main/tests/suites/exercises/";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site layout (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Stylesheet compilation.
    pub styles: StylesConfig,
    /// Markdown rendering.
    pub markdown: MarkdownConfig,
    /// Guide exercise API.
    pub exercises: ExercisesConfig,
    /// Documentation groups.
    pub groups: Vec<GroupConfig>,
    /// Standalone pages.
    pub pages: Vec<PageConfig>,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    title: Option<String>,
    dir: Option<String>,
    content_dir: Option<String>,
    templates_dir: Option<String>,
    views_dir: Option<String>,
    static_dir: Option<String>,
}

impl SiteConfigRaw {
    /// Resolve paths against `config_dir`.
    ///
    /// `dir_override` replaces `site.dir`; subdirectories not set explicitly
    /// follow it.
    fn resolve(&self, config_dir: &Path, dir_override: Option<&Path>) -> SiteConfig {
        let dir = match dir_override {
            Some(dir) => dir.to_path_buf(),
            None => config_dir.join(self.dir.as_deref().unwrap_or("site")),
        };
        let sub = |explicit: Option<&str>, default: &str| match explicit {
            Some(path) => config_dir.join(path),
            None => dir.join(default),
        };

        SiteConfig {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| "chai-lang.dev".to_owned()),
            content_dir: sub(self.content_dir.as_deref(), "content"),
            templates_dir: sub(self.templates_dir.as_deref(), "templates"),
            views_dir: sub(self.views_dir.as_deref(), "views"),
            static_dir: sub(self.static_dir.as_deref(), "static"),
            dir,
        }
    }
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site title, appended to page titles.
    pub title: String,
    /// Site directory.
    pub dir: PathBuf,
    /// Markdown content, `titles.txt` files and exercise descriptors.
    pub content_dir: PathBuf,
    /// Page templates (`base.html`, `doc-group.html`, ...).
    pub templates_dir: PathBuf,
    /// Raw HTML views for standalone pages.
    pub views_dir: PathBuf,
    /// Static assets served under `/static`.
    pub static_dir: PathBuf,
}

impl SiteConfig {
    /// SCSS sources (`static/scss`).
    #[must_use]
    pub fn scss_dir(&self) -> PathBuf {
        self.static_dir.join("scss")
    }

    /// Compiled stylesheets (`static/dist`).
    #[must_use]
    pub fn dist_dir(&self) -> PathBuf {
        self.static_dir.join("dist")
    }
}

/// CSS output style.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Indented output.
    #[default]
    Expanded,
    /// Minified output.
    Compressed,
}

/// Stylesheet configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    /// CSS output style.
    pub output_style: OutputStyle,
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Language class for code blocks without one. Empty disables it.
    pub code_language: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            code_language: "chai".to_owned(),
        }
    }
}

impl MarkdownConfig {
    /// Default code language, if enabled.
    #[must_use]
    pub fn code_language(&self) -> Option<&str> {
        Some(self.code_language.as_str()).filter(|lang| !lang.is_empty())
    }
}

/// Guide exercise API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExercisesConfig {
    /// Base URL solution paths are appended to.
    pub base_url: String,
    /// Directory of exercise descriptors inside the content directory.
    pub dir: String,
    /// Solution fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExercisesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EXERCISES_BASE_URL.to_owned(),
            dir: "guide/exercises".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Page layout of a documentation group.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// `chapter<N>/section<M>.md` with `titles.txt`.
    #[default]
    Sectioned,
    /// `chapter<N>.md`.
    Flat,
    /// `chapter<N>/<file>`.
    Nested,
}

/// Documentation group configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Content directory name.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Page layout.
    #[serde(default)]
    pub layout: LayoutKind,
    /// Page file inside each chapter directory (`nested` layout only).
    #[serde(default)]
    pub file: Option<String>,
    /// Route prefix (default `/docs/<slug>`).
    #[serde(default)]
    pub route: Option<String>,
    /// Page template (default `doc-group.html`).
    #[serde(default)]
    pub template: Option<String>,
    /// Chapter files passed to the template when present.
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Page stylesheet under `/static/scss/`.
    #[serde(default)]
    pub style: Option<String>,
    /// Web components the page loads.
    #[serde(default)]
    pub components: Vec<String>,
}

impl GroupConfig {
    /// Route prefix of the group.
    #[must_use]
    pub fn route(&self) -> String {
        self.route
            .clone()
            .unwrap_or_else(|| format!("/docs/{}", self.slug))
    }

    /// Page template of the group.
    #[must_use]
    pub fn template(&self) -> &str {
        self.template.as_deref().unwrap_or("doc-group.html")
    }

    /// Page stylesheet of the group.
    #[must_use]
    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or("doc-group.scss")
    }
}

/// Standalone page configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Route the page is served at.
    pub route: String,
    /// Page title.
    pub title: String,
    /// HTML view under the views directory.
    #[serde(default)]
    pub view: Option<String>,
    /// Markdown document under the content directory.
    #[serde(default)]
    pub markdown: Option<String>,
    /// Page stylesheet under `/static/scss/`.
    #[serde(default)]
    pub style: Option<String>,
    /// Web components the page loads.
    #[serde(default)]
    pub components: Vec<String>,
}

/// Where a standalone page's body comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSource<'a> {
    /// Raw HTML view file.
    View(&'a str),
    /// Markdown document rendered through `doc-page.html`.
    Markdown(&'a str),
}

impl PageConfig {
    /// Body source. `None` only for configs that failed validation.
    #[must_use]
    pub fn source(&self) -> Option<PageSource<'_>> {
        match (&self.view, &self.markdown) {
            (Some(view), None) => Some(PageSource::View(view)),
            (None, Some(markdown)) => Some(PageSource::Markdown(markdown)),
            _ => None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`exercises.base_url`").
        field: String,
        /// Error message (e.g., "${`CHAI_EXERCISES_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a route to be absolute.
fn require_route(route: &str, field: &str) -> Result<(), ConfigError> {
    if !route.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with /, got {route:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `chai-site.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(site_dir) = &settings.site_dir {
            let config_dir = self.config_dir();
            self.site_resolved = self.site.resolve(&config_dir, Some(site_dir));
        }
    }

    /// Directory relative paths are resolved against.
    fn config_dir(&self) -> PathBuf {
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    ///
    /// Without a config file the site serves the book, the home and docs
    /// landing pages and the module schema page.
    fn default_with_base(base: &Path) -> Self {
        let site = SiteConfigRaw::default();
        Self {
            server: ServerConfig::default(),
            site_resolved: site.resolve(base, None),
            site,
            styles: StylesConfig::default(),
            markdown: MarkdownConfig::default(),
            exercises: ExercisesConfig::default(),
            groups: default_groups(),
            pages: default_pages(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_exercises()?;
        self.validate_groups()?;
        self.validate_pages()?;
        self.validate_routes()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate exercise configuration.
    fn validate_exercises(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.exercises.base_url, "exercises.base_url")?;
        require_http_url(&self.exercises.base_url, "exercises.base_url")?;
        if self.exercises.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "exercises.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate documentation groups.
    fn validate_groups(&self) -> Result<(), ConfigError> {
        let mut slugs = HashSet::new();
        for group in &self.groups {
            require_non_empty(&group.slug, "groups.slug")?;
            if group.slug.contains('/') || group.slug.contains("..") {
                return Err(ConfigError::Validation(format!(
                    "groups.slug must be a single directory name, got {:?}",
                    group.slug
                )));
            }
            if !slugs.insert(group.slug.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate group slug {:?}",
                    group.slug
                )));
            }
            if let Some(route) = &group.route {
                require_route(route, &format!("groups.{}.route", group.slug))?;
            }
            match (group.layout, &group.file) {
                (LayoutKind::Nested, None) => {
                    return Err(ConfigError::Validation(format!(
                        "group {:?} uses the nested layout and requires file",
                        group.slug
                    )));
                }
                (LayoutKind::Nested, Some(file)) => {
                    require_non_empty(file, &format!("groups.{}.file", group.slug))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate standalone pages.
    fn validate_pages(&self) -> Result<(), ConfigError> {
        for page in &self.pages {
            require_route(&page.route, "pages.route")?;
            if page.source().is_none() {
                return Err(ConfigError::Validation(format!(
                    "page {} must set exactly one of view or markdown",
                    page.route
                )));
            }
        }
        Ok(())
    }

    /// Reject two pages or groups claiming the same route, or a route the
    /// server itself serves.
    fn validate_routes(&self) -> Result<(), ConfigError> {
        let mut routes = HashSet::new();
        let all = self
            .pages
            .iter()
            .map(|page| page.route.clone())
            .chain(self.groups.iter().map(GroupConfig::route));
        for route in all {
            let normalized = match route.trim_end_matches('/') {
                "" => "/".to_owned(),
                trimmed => trimmed.to_owned(),
            };
            if normalized == EXERCISE_ROUTE
                || normalized == STATIC_ROUTE
                || normalized.starts_with(&format!("{STATIC_ROUTE}/"))
            {
                return Err(ConfigError::Validation(format!(
                    "route {route} is reserved by the server"
                )));
            }
            if !routes.insert(normalized) {
                return Err(ConfigError::Validation(format!(
                    "route {route} is configured more than once"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.exercises.base_url =
            expand::expand_env(&self.exercises.base_url, "exercises.base_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = self.site.resolve(config_dir, None);
    }
}

fn default_groups() -> Vec<GroupConfig> {
    vec![GroupConfig {
        slug: "book".to_owned(),
        name: "The Chai Book".to_owned(),
        layout: LayoutKind::Sectioned,
        file: None,
        route: None,
        template: None,
        attachments: Vec::new(),
        style: None,
        components: vec!["section-title".to_owned(), "guide-exercise".to_owned()],
    }]
}

fn default_pages() -> Vec<PageConfig> {
    vec![
        PageConfig {
            route: "/".to_owned(),
            title: "chai-lang.dev".to_owned(),
            view: Some("index.html".to_owned()),
            markdown: None,
            style: Some("index.scss".to_owned()),
            components: Vec::new(),
        },
        PageConfig {
            route: "/docs".to_owned(),
            title: "docs".to_owned(),
            view: Some("docs.html".to_owned()),
            markdown: None,
            style: Some("docs.scss".to_owned()),
            components: vec!["section-title".to_owned(), "doc-card".to_owned()],
        },
        PageConfig {
            route: "/docs/module-schema".to_owned(),
            title: "docs".to_owned(),
            view: None,
            markdown: Some("module_schema.md".to_owned()),
            style: Some("doc-page.scss".to_owned()),
            components: vec!["section-title".to_owned()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.site_resolved.title, "chai-lang.dev");
        assert_eq!(config.site_resolved.dir, PathBuf::from("/test/site"));
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/test/site/content")
        );
        assert_eq!(
            config.site_resolved.scss_dir(),
            PathBuf::from("/test/site/static/scss")
        );
        assert_eq!(
            config.site_resolved.dist_dir(),
            PathBuf::from("/test/site/static/dist")
        );
        assert_eq!(config.markdown.code_language(), Some("chai"));
        assert_eq!(config.exercises.dir, "guide/exercises");
        assert_eq!(config.exercises.base_url, DEFAULT_EXERCISES_BASE_URL);
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].route(), "/docs/book");
        assert_eq!(config.pages.len(), 3);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.groups, default_groups());
        assert_eq!(config.pages, default_pages());
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_groups_and_pages() {
        let toml = r#"
[styles]
output_style = "compressed"

[markdown]
code_language = ""

[[groups]]
slug = "spec"
name = "Language Specification"
layout = "flat"

[[groups]]
slug = "tour"
name = "Tour"
layout = "nested"
file = "lesson.md"
route = "/tour"
template = "tour.html"
style = "tour.scss"
attachments = ["template.chai", "solution.chai", "output.txt"]
components = ["section-title"]

[[pages]]
route = "/docs/module-schema"
title = "docs"
markdown = "module_schema.md"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.styles.output_style, OutputStyle::Compressed);
        assert_eq!(config.markdown.code_language(), None);
        assert_eq!(config.groups.len(), 2);
        let spec = &config.groups[0];
        assert_eq!(spec.layout, LayoutKind::Flat);
        assert_eq!(spec.route(), "/docs/spec");
        assert_eq!(spec.template(), "doc-group.html");
        assert_eq!(spec.style(), "doc-group.scss");
        let tour = &config.groups[1];
        assert_eq!(tour.layout, LayoutKind::Nested);
        assert_eq!(tour.file.as_deref(), Some("lesson.md"));
        assert_eq!(tour.route(), "/tour");
        assert_eq!(tour.template(), "tour.html");
        assert_eq!(tour.attachments.len(), 3);
        assert_eq!(config.pages.len(), 1);
        assert_eq!(
            config.pages[0].source(),
            Some(PageSource::Markdown("module_schema.md"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_unknown_group_field_rejected() {
        let toml = r#"
[[groups]]
slug = "book"
name = "Book"
chapters = 3
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
title = "Chai"
dir = "www"
templates_dir = "shared/templates"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved,
            SiteConfig {
                title: "Chai".to_owned(),
                dir: PathBuf::from("/project/www"),
                content_dir: PathBuf::from("/project/www/content"),
                templates_dir: PathBuf::from("/project/shared/templates"),
                views_dir: PathBuf::from("/project/www/views"),
                static_dir: PathBuf::from("/project/www/static"),
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 3000\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.site_resolved.dir, dir.path().join("site"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/chai-site.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_runs_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_apply_cli_settings_host_and_port() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9090),
            site_dir: None,
        });

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.site_resolved.dir, PathBuf::from("/test/site"));
    }

    #[test]
    fn test_apply_cli_settings_site_dir() {
        let toml = r#"
[site]
views_dir = "custom/views"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config.config_path = Some(PathBuf::from("/project/chai-site.toml"));

        config.apply_cli_settings(&CliSettings {
            site_dir: Some(PathBuf::from("/elsewhere")),
            ..CliSettings::default()
        });

        assert_eq!(config.site_resolved.dir, PathBuf::from("/elsewhere"));
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/elsewhere/content")
        );
        assert_eq!(
            config.site_resolved.views_dir,
            PathBuf::from("/project/custom/views")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_expand_env_vars_server_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHAI_TEST_HOST", "0.0.0.0");
        }

        let toml = r#"
[server]
host = "${CHAI_TEST_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");

        unsafe {
            std::env::remove_var("CHAI_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_exercises_base_url_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CHAI_TEST_EXERCISES_URL");
        }

        let toml = r#"
[exercises]
base_url = "${CHAI_TEST_EXERCISES_URL:-https://mirror.test/exercises/}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.exercises.base_url, "https://mirror.test/exercises/");
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_CHAI_CONFIG_TEST");
        }

        let toml = r#"
[exercises]
base_url = "${MISSING_VAR_CHAI_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_CHAI_CONFIG_TEST"));
        assert!(err.to_string().contains("exercises.base_url"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_validate_server_host_empty() {
        let config = parse("[server]\nhost = \"\"\n");

        assert_validation_error(&config, &["server.host", "cannot be empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let config = parse("[server]\nport = 0\n");

        assert_validation_error(&config, &["server.port", "cannot be 0"]);
    }

    #[test]
    fn test_validate_exercises_base_url_scheme() {
        let config = parse("[exercises]\nbase_url = \"ftp://example.com/\"\n");

        assert_validation_error(&config, &["exercises.base_url", "http://"]);
    }

    #[test]
    fn test_validate_exercises_timeout_zero() {
        let config = parse("[exercises]\ntimeout_secs = 0\n");

        assert_validation_error(&config, &["exercises.timeout_secs"]);
    }

    #[test]
    fn test_validate_duplicate_group_slug() {
        let config = parse(
            r#"
[[groups]]
slug = "book"
name = "Book"

[[groups]]
slug = "book"
name = "Another Book"
route = "/book"
"#,
        );

        assert_validation_error(&config, &["duplicate group slug", "book"]);
    }

    #[test]
    fn test_validate_group_slug_with_separator() {
        let config = parse(
            r#"
[[groups]]
slug = "../secrets"
name = "Nope"
"#,
        );

        assert_validation_error(&config, &["groups.slug"]);
    }

    #[test]
    fn test_validate_group_route_must_be_absolute() {
        let config = parse(
            r#"
[[groups]]
slug = "tour"
name = "Tour"
route = "tour"
"#,
        );

        assert_validation_error(&config, &["groups.tour.route", "must start with /"]);
    }

    #[test]
    fn test_validate_nested_group_requires_file() {
        let config = parse(
            r#"
[[groups]]
slug = "tour"
name = "Tour"
layout = "nested"
"#,
        );

        assert_validation_error(&config, &["tour", "requires file"]);
    }

    #[test]
    fn test_validate_page_requires_one_source() {
        let both = parse(
            r#"
[[pages]]
route = "/"
title = "Home"
view = "index.html"
markdown = "index.md"
"#,
        );
        let neither = parse(
            r#"
[[pages]]
route = "/"
title = "Home"
"#,
        );

        assert_validation_error(&both, &["exactly one of view or markdown"]);
        assert_validation_error(&neither, &["exactly one of view or markdown"]);
    }

    #[test]
    fn test_validate_duplicate_routes() {
        let config = parse(
            r#"
[[groups]]
slug = "book"
name = "Book"

[[pages]]
route = "/docs/book/"
title = "Shadow"
view = "book.html"
"#,
        );

        assert_validation_error(&config, &["/docs/book", "more than once"]);
    }

    #[test]
    fn test_validate_reserved_routes() {
        let static_group = parse(
            r#"
[[groups]]
slug = "assets"
name = "Assets"
route = "/static"
"#,
        );
        let nested_page = parse(
            r#"
[[pages]]
route = "/static/scss/index.scss"
title = "Styles"
view = "styles.html"
"#,
        );
        let exercise_page = parse(
            r#"
[[pages]]
route = "/api/guide/exercise/"
title = "Exercise"
view = "exercise.html"
"#,
        );

        assert_validation_error(&static_group, &["/static", "reserved"]);
        assert_validation_error(&nested_page, &["/static/scss/index.scss", "reserved"]);
        assert_validation_error(&exercise_page, &["/api/guide/exercise", "reserved"]);
    }

    #[test]
    fn test_validate_route_sharing_static_prefix_text() {
        let config = parse(
            r#"
[[pages]]
route = "/statics"
title = "Statics"
view = "statics.html"
"#,
        );

        assert!(config.validate().is_ok());
    }
}
