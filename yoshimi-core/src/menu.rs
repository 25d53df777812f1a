use itertools::Itertools;

use crate::config::{LinkRef, MenuItem};

/// A row of menu links, rendered inside its own wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub links: Vec<LinkRef>,
}

/// Split `items` into runs separated by dividers.
///
/// `is_divider` must return true for the separators, not for the items to
/// keep. Separators are dropped and runs that would be empty are skipped, so
/// leading, trailing and repeated dividers never produce a group.
pub fn split_on<T, F>(items: &[T], mut is_divider: F) -> Vec<Vec<&T>>
where
    F: FnMut(&T) -> bool,
{
    let runs = items.iter().chunk_by(|item| is_divider(*item));

    let groups = (&runs)
        .into_iter()
        .filter(|(divider, _)| !divider)
        .map(|(_, run)| run.collect())
        .collect();
    groups
}

/// Group the configured menu entries into rows.
pub fn menu_groups(items: &[MenuItem]) -> Vec<MenuGroup> {
    split_on(items, MenuItem::is_divider)
        .into_iter()
        .map(|run| MenuGroup {
            links: run
                .into_iter()
                .filter_map(|item| match item {
                    MenuItem::Link(link) => Some(link.clone()),
                    MenuItem::Divider => None,
                })
                .collect(),
        })
        .collect()
}
