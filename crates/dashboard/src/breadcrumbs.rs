//! Breadcrumb trail for a route path.
//!
//! `/orders/ORD-000012/edit` becomes
//! `Dashboard › Orders › ORD-000012 › Edit`, each crumb linking to the
//! path up to and including its segment. The last crumb is the current
//! page and does not link.

use serde::Serialize;

/// Display names of known route segments
const ROUTE_NAMES: &[(&str, &str)] = &[
    ("orders", "Orders"),
    ("products", "Products"),
    ("categories", "Categories"),
    ("promotions", "Promotions"),
    ("clients", "Clients"),
    ("activity-log", "Activity Log"),
    ("settings", "Settings"),
    ("new", "New"),
    ("edit", "Edit"),
    ("import", "Import"),
];

pub const ROOT_LABEL: &str = "Dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// `None` for the current page
    pub href: Option<String>,
}

pub fn route_name(segment: &str) -> Option<&'static str> {
    ROUTE_NAMES
        .iter()
        .find(|(route, _)| *route == segment)
        .map(|(_, name)| *name)
}

/// Resolve a route path (query string and trailing slashes ignored).
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut crumbs = vec![Breadcrumb {
        label: ROOT_LABEL.to_string(),
        href: Some("/".to_string()),
    }];

    let mut href = String::new();
    for segment in &segments {
        href.push('/');
        href.push_str(segment);
        crumbs.push(Breadcrumb {
            label: segment_label(segment),
            href: Some(href.clone()),
        });
    }

    if let Some(last) = crumbs.last_mut() {
        last.href = None;
    }
    crumbs
}

/// Known segments by name, record ids verbatim, anything else title-cased.
fn segment_label(segment: &str) -> String {
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    if let Some(name) = route_name(&decoded) {
        return name.to_string();
    }
    if looks_like_id(&decoded) {
        return decoded;
    }
    title_case(&decoded)
}

fn looks_like_id(segment: &str) -> bool {
    segment.chars().any(|c| c.is_ascii_digit())
}

fn title_case(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a trail as plain text.
pub fn render(crumbs: &[Breadcrumb]) -> String {
    crumbs
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join(" › ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(path: &str) -> Vec<String> {
        breadcrumbs(path).into_iter().map(|c| c.label).collect()
    }

    #[test]
    fn test_root_only() {
        let crumbs = breadcrumbs("/");

        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].label, "Dashboard");
        assert_eq!(crumbs[0].href, None);
    }

    #[test]
    fn test_known_segments_and_ids() {
        assert_eq!(
            labels("/orders/ORD-000012/edit"),
            vec!["Dashboard", "Orders", "ORD-000012", "Edit"]
        );
        assert_eq!(labels("/activity-log"), vec!["Dashboard", "Activity Log"]);
    }

    #[test]
    fn test_hrefs_are_cumulative() {
        let crumbs = breadcrumbs("/products/PRD-ESP-1?tab=stock");
        let hrefs: Vec<_> = crumbs.iter().map(|c| c.href.as_deref()).collect();

        assert_eq!(hrefs, vec![Some("/"), Some("/products"), None]);
    }

    #[test]
    fn test_unknown_segment_is_title_cased() {
        assert_eq!(labels("/gift-cards/"), vec!["Dashboard", "Gift Cards"]);
    }

    #[test]
    fn test_render() {
        assert_eq!(
            render(&breadcrumbs("/promotions/new")),
            "Dashboard › Promotions › New"
        );
    }
}
