use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Title used for pages that don't set one.
pub const DEFAULT_TITLE: &str = "Yoshimi";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    /// The file was read but is not valid UTF-8.
    Encoding(PathBuf),
    Parsing(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Encoding(p) => write!(f, "{} is not valid UTF-8", p.display()),
            ConfigError::Parsing(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Encoding(_) => None,
            ConfigError::Parsing(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

/// Everything `site.json` describes.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub pages: Vec<PageRef>,
    pub footer_links: Vec<LinkRef>,
    pub menu_links: Vec<MenuItem>,
    pub template: PathBuf,
    #[serde(default)]
    pub copy: Option<Vec<PathBuf>>,
}

impl SiteConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let data =
            String::from_utf8(bytes).map_err(|_| ConfigError::Encoding(path.to_path_buf()))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(data)?;

        Ok(config)
    }

    /// Extra files and directories to copy next to the pages.
    pub fn copy_list(&self) -> &[PathBuf] {
        self.copy.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PageRef {
    /// Source file holding the page body. Its file name is also the output name.
    pub url: PathBuf,
    #[serde(default)]
    pub title: Option<String>,
}

impl PageRef {
    pub fn title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_TITLE,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub url: String,
    pub name: String,
}

/// One entry of `menu_links`.
///
/// In JSON a divider is written as an array (normally `[]`) between link
/// objects.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RawMenuItem", into = "RawMenuItem")]
pub enum MenuItem {
    Link(LinkRef),
    Divider,
}

impl MenuItem {
    pub fn is_divider(&self) -> bool {
        matches!(self, MenuItem::Divider)
    }
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawMenuItem {
    Divider(Vec<serde_json::Value>),
    Link(LinkRef),
}

impl From<RawMenuItem> for MenuItem {
    fn from(raw: RawMenuItem) -> Self {
        match raw {
            RawMenuItem::Divider(_) => MenuItem::Divider,
            RawMenuItem::Link(link) => MenuItem::Link(link),
        }
    }
}

impl From<MenuItem> for RawMenuItem {
    fn from(item: MenuItem) -> Self {
        match item {
            MenuItem::Divider => RawMenuItem::Divider(Vec::new()),
            MenuItem::Link(link) => RawMenuItem::Link(link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = r#"{
        "pages": [{"url": "src/index.html", "title": "Home"}, {"url": "src/about.html"}],
        "footer_links": [{"url": "about.html", "name": "About"}],
        "menu_links": [
            {"url": "index.html", "name": "Home"},
            [],
            {"url": "about.html", "name": "About"}
        ],
        "template": "template.html",
        "copy": ["css", "favicon.ico"]
    }"#;

    #[test]
    fn test_parse_full_config() {
        let config = SiteConfig::from_json(SITE).unwrap();
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].title(), "Home");
        assert_eq!(config.pages[1].title(), DEFAULT_TITLE);
        assert_eq!(config.template, PathBuf::from("template.html"));
        assert_eq!(
            config.copy_list(),
            &[PathBuf::from("css"), PathBuf::from("favicon.ico")]
        );
        assert_eq!(
            config.menu_links,
            vec![
                MenuItem::Link(LinkRef {
                    url: "index.html".into(),
                    name: "Home".into()
                }),
                MenuItem::Divider,
                MenuItem::Link(LinkRef {
                    url: "about.html".into(),
                    name: "About".into()
                }),
            ]
        );
    }

    #[test]
    fn test_copy_is_optional() {
        let config = SiteConfig::from_json(
            r#"{"pages": [], "footer_links": [], "menu_links": [], "template": "t.html"}"#,
        )
        .unwrap();
        assert!(config.copy.is_none());
        assert!(config.copy_list().is_empty());
    }

    #[test]
    fn test_empty_title_falls_back_to_site_name() {
        let page: PageRef = serde_json::from_str(r#"{"url": "a.html", "title": ""}"#).unwrap();
        assert_eq!(page.title(), DEFAULT_TITLE);
        let page: PageRef = serde_json::from_str(r#"{"url": "a.html", "title": null}"#).unwrap();
        assert_eq!(page.title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_non_empty_array_is_still_a_divider() {
        let item: MenuItem = serde_json::from_str(r#"[1, "x"]"#).unwrap();
        assert!(item.is_divider());
    }

    #[test]
    fn test_scalar_menu_entry_is_rejected() {
        let err = serde_json::from_str::<MenuItem>("42").unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_missing_key_is_a_parse_error() {
        let err = SiteConfig::from_json(r#"{"pages": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parsing(_)));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = SiteConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parsing(_)));
    }

    #[test]
    fn test_non_utf8_file_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, [0xff, 0xfe, b'{']).unwrap();
        let err = SiteConfig::read(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Encoding(ref p) if *p == path));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::read(dir.path().join("site.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
