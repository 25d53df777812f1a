pub mod builder;
pub mod config;
pub mod menu;
pub mod renderer;
pub mod template;

// Re-export main types
pub use builder::{BuildError, BuildOptions, BuildSummary, build_site};
pub use config::{ConfigError, LinkRef, MenuItem, PageRef, SiteConfig};
pub use menu::{MenuGroup, menu_groups, split_on};
pub use renderer::{RenderedPage, render_page};
pub use template::{Template, TemplateError};
