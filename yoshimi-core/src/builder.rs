use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::menu::menu_groups;
use crate::renderer::{PLACEHOLDERS, RenderedPage, render_page};
use crate::template::{Template, TemplateError};

#[derive(Debug)]
pub enum BuildError {
    /// A page path with no file name to write it under.
    InvalidPath(PathBuf),
    TemplateError(TemplateError),
    /// A source file that is not valid UTF-8.
    Encoding(PathBuf),
    /// Reading a source file or writing a staged page failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Promoting the staged pages or copying an extra entry failed.
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl BuildError {
    /// Whether this is a plain file access failure rather than bad input.
    pub fn is_io(&self) -> bool {
        matches!(self, BuildError::Io { .. })
    }
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::TemplateError(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::InvalidPath(p) => write!(f, "Invalid path: {}", p.display()),
            BuildError::TemplateError(e) => write!(f, "{}", e),
            BuildError::Encoding(p) => write!(f, "{} is not valid UTF-8", p.display()),
            BuildError::Io { path, source } => {
                write!(f, "IO error on {}: {}", path.display(), source)
            }
            BuildError::Copy { from, to, source } => write!(
                f,
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                source
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::TemplateError(e) => Some(e),
            BuildError::Io { source, .. } | BuildError::Copy { source, .. } => Some(source),
            BuildError::InvalidPath(_) | BuildError::Encoding(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory the finished site is merged into.
    pub build_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("out"),
        }
    }
}

impl BuildOptions {
    pub fn new<P: AsRef<Path>>(build_dir: P) -> Self {
        Self {
            build_dir: build_dir.as_ref().to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    /// File names of the pages written, in configuration order.
    pub pages: Vec<String>,
    /// Destinations of the extra entries copied into the output directory.
    pub copied: Vec<PathBuf>,
}

/// Render every page of `site` and write the result into the build directory.
///
/// Pages are rendered into a temporary staging directory first and merged
/// into the build directory only once all of them succeeded. The staging
/// directory is removed when this returns, whatever the outcome.
pub fn build_site(site: &SiteConfig, options: &BuildOptions) -> Result<BuildSummary, BuildError> {
    let source = read_source(&site.template)?;
    let template = Template::parse(&source)?;
    template.require(&PLACEHOLDERS)?;

    let groups = menu_groups(&site.menu_links);

    let mut rendered = Vec::with_capacity(site.pages.len());
    for page in &site.pages {
        rendered.push(render_page(page, &site.footer_links, &groups, &template)?);
    }

    let staging = tempfile::Builder::new()
        .prefix("yoshimi-")
        .tempdir()
        .map_err(|source| BuildError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    stage_pages(staging.path(), &rendered)?;
    copy_tree(staging.path(), &options.build_dir)?;

    let copied = copy_extras(site.copy_list(), &options.build_dir)?;

    Ok(BuildSummary {
        output_dir: options.build_dir.clone(),
        pages: rendered.into_iter().map(|page| page.name).collect(),
        copied,
    })
}

/// Read a text source. Missing or unreadable files are I/O errors, content
/// that is not UTF-8 is not.
pub(crate) fn read_source(path: &Path) -> Result<String, BuildError> {
    let bytes = fs::read(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| BuildError::Encoding(path.to_path_buf()))
}

/// Write each page into `dir`. A later page with the same name replaces an
/// earlier one.
pub fn stage_pages(dir: &Path, pages: &[RenderedPage]) -> Result<(), BuildError> {
    for page in pages {
        let path = dir.join(&page.name);
        fs::write(&path, &page.html).map_err(|source| BuildError::Io { path, source })?;
    }
    Ok(())
}

/// Copy everything under `src` into `dst`, merging with what is already there.
/// Symlinks are followed and their targets copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<(), BuildError> {
    let copy_error = |from: &Path, to: &Path, source: std::io::Error| BuildError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| copy_error(src, dst, e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| BuildError::InvalidPath(entry.path().to_path_buf()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| copy_error(entry.path(), &target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| copy_error(entry.path(), &target, e))?;
        }
    }

    Ok(())
}

/// Copy each entry of `entries` into `build_dir` under its own file name.
/// Directories are copied recursively.
pub fn copy_extras(entries: &[PathBuf], build_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut copied = Vec::with_capacity(entries.len());

    for src in entries {
        let name = src
            .file_name()
            .ok_or_else(|| BuildError::InvalidPath(src.clone()))?;
        let dst = build_dir.join(name);

        if src.is_dir() {
            copy_tree(src, &dst)?;
        } else {
            fs::copy(src, &dst).map_err(|source| BuildError::Copy {
                from: src.clone(),
                to: dst.clone(),
                source,
            })?;
        }
        log::debug!("Copied {} to {}", src.display(), dst.display());

        copied.push(dst);
    }

    Ok(copied)
}
