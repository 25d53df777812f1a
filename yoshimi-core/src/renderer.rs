use std::path::Path;

use crate::builder::{BuildError, read_source};
use crate::config::{LinkRef, PageRef};
use crate::menu::MenuGroup;
use crate::template::{Context, Template};

/// Placeholders every page template has to provide.
pub const PLACEHOLDERS: [&str; 4] = ["title", "menu_rows", "content", "footer_links"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output file name, taken from the last component of the source path.
    pub name: String,
    pub html: String,
}

/// The name a page is written under and matched against link urls.
pub fn page_name(src: &Path) -> Result<String, BuildError> {
    src.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| BuildError::InvalidPath(src.to_path_buf()))
}

pub fn render_menu(current: &str, groups: &[MenuGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(r#"<div class="menurow">"#);
        for link in &group.links {
            let styling = if link.url == current { r#"class="active""# } else { "" };
            out.push_str(&format!(
                r#"<a href="{}" {} >{}</a>"#,
                link.url, styling, link.name
            ));
        }
        out.push_str("</div>");
    }
    out
}

pub fn render_footer(current: &str, links: &[LinkRef]) -> String {
    links
        .iter()
        .map(|link| {
            let style = if link.url == current {
                r#"style="font-weight:bold""#
            } else {
                ""
            };
            format!(r#"<a href="{}" {}>{}</a>"#, link.url, style, link.name)
        })
        .collect()
}

/// Fill the template for a page whose body is already in memory.
pub fn assemble_page(
    name: &str,
    title: &str,
    content: &str,
    footer_links: &[LinkRef],
    menu_groups: &[MenuGroup],
    template: &Template,
) -> Result<String, BuildError> {
    let menu_rows = render_menu(name, menu_groups);
    let footer = render_footer(name, footer_links);

    let mut context = Context::new();
    context.add_to_context("title", title);
    context.add_to_context("menu_rows", &menu_rows);
    context.add_to_context("content", content);
    context.add_to_context("footer_links", &footer);

    Ok(template.render(&context)?)
}

/// Read a page's source and render it into the shared template.
pub fn render_page(
    page: &PageRef,
    footer_links: &[LinkRef],
    menu_groups: &[MenuGroup],
    template: &Template,
) -> Result<RenderedPage, BuildError> {
    let content = read_source(&page.url)?;
    let name = page_name(&page.url)?;

    let html = assemble_page(
        &name,
        page.title(),
        &content,
        footer_links,
        menu_groups,
        template,
    )?;
    log::debug!("Rendered {} from {}", name, page.url.display());

    Ok(RenderedPage { name, html })
}
