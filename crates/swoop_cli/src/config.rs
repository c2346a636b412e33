//! Style and item loading for the CLI
//!
//! Styles come from a TOML file (see [`NavBarStyle`] for the keys); items come
//! from a comma-separated `--items` list or fall back to a four-item demo bar.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use swoop_navbar::{NavBarStyle, NavItem, NavItems};

/// Load a style file, or the default style when no path is given
pub fn load_style(path: Option<&Path>) -> Result<NavBarStyle> {
    let Some(path) = path else {
        return Ok(NavBarStyle::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    NavBarStyle::from_toml_str(&source)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse `id[:icon]` entries separated by commas
///
/// Labels are derived from the id. Without a list the demo items are used.
pub fn parse_items(list: Option<&str>) -> Result<NavItems> {
    let Some(list) = list else {
        return demo_items();
    };
    let items = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, icon) = entry.split_once(':').unwrap_or((entry, entry));
            NavItem::new(id, title_case(id), icon)
        });
    NavItems::new(items).with_context(|| format!("Invalid item list '{}'", list))
}

pub fn demo_items() -> Result<NavItems> {
    let items = NavItems::new([
        NavItem::new("home", "Home", "home"),
        NavItem::new("requests", "Requests", "mail_outline"),
        NavItem::new("new", "New", "add"),
        NavItem::new("profile", "Profile", "person"),
    ])?;
    Ok(items)
}

/// Resolve an item given by id or by slot index
pub fn resolve_item(items: &NavItems, key: &str) -> Result<usize> {
    if let Some(index) = items.index_of(key) {
        return Ok(index);
    }
    match key.parse::<usize>() {
        Ok(index) if index < items.len() => Ok(index),
        Ok(index) => anyhow::bail!(
            "Item index {} out of range (bar has {} items)",
            index,
            items.len()
        ),
        Err(_) => anyhow::bail!("Unknown item '{}'", key),
    }
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let items = parse_items(Some("home, search:magnifier ,profile")).unwrap();
        assert_eq!(items.len(), 3);
        let search = items.get(1).unwrap();
        assert_eq!(search.id, "search");
        assert_eq!(search.label, "Search");
        assert_eq!(search.icon.as_str(), "magnifier");
    }

    #[test]
    fn test_parse_items_rejects_bad_lists() {
        assert!(parse_items(Some("a,b,a")).is_err());
        assert!(parse_items(Some(" , ")).is_err());
    }

    #[test]
    fn test_default_items() {
        assert_eq!(parse_items(None).unwrap().len(), 4);
    }

    #[test]
    fn test_resolve_item() {
        let items = demo_items().unwrap();
        assert_eq!(resolve_item(&items, "new").unwrap(), 2);
        assert_eq!(resolve_item(&items, "3").unwrap(), 3);
        assert!(resolve_item(&items, "4").is_err());
        assert!(resolve_item(&items, "settings").is_err());
    }

    #[test]
    fn test_missing_style_file() {
        let err = load_style(Some(Path::new("/nonexistent/style.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_default_style() {
        assert_eq!(load_style(None).unwrap(), NavBarStyle::default());
    }
}
