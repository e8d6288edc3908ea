//! Category tree building and sibling reordering.
//!
//! Categories are stored flat with a `parent_id`. The tree view groups them
//! by parent, orders siblings by `position` (then name), and promotes
//! categories whose parent does not exist to the root level.

use crate::error::{Result, StoreError};
use crate::types::Category;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A category with its children, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of categories in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }
}

/// Build the category forest.
///
/// Every input category appears exactly once. A category is attached under
/// its parent only when that parent is reachable from a root, so parent
/// cycles in bad data end up at the root level instead of disappearing.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let ids: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();

    let mut children_of: HashMap<&str, Vec<&Category>> = HashMap::new();
    let mut roots: Vec<&Category> = Vec::new();
    for category in categories {
        match category.parent_id.as_deref() {
            Some(parent) if parent != category.id && ids.contains(parent) => {
                children_of.entry(parent).or_default().push(category);
            }
            _ => roots.push(category),
        }
    }

    let mut placed: HashSet<&str> = HashSet::new();
    let mut forest = build_level(roots, &children_of, &mut placed);

    // Anything not reached from a root sits on a parent cycle.
    let stranded: Vec<&Category> = categories
        .iter()
        .filter(|c| !placed.contains(c.id.as_str()))
        .collect();
    if !stranded.is_empty() {
        tracing::warn!("{} categories are on a parent cycle; promoting to root", stranded.len());
        for category in stranded {
            if placed.contains(category.id.as_str()) {
                continue;
            }
            let mut detached = build_level(vec![category], &children_of, &mut placed);
            forest.append(&mut detached);
        }
        sort_siblings(&mut forest);
    }

    forest
}

fn build_level<'a>(
    mut level: Vec<&'a Category>,
    children_of: &HashMap<&str, Vec<&'a Category>>,
    placed: &mut HashSet<&'a str>,
) -> Vec<CategoryNode> {
    level.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));

    let mut nodes = Vec::with_capacity(level.len());
    for category in level {
        if !placed.insert(category.id.as_str()) {
            continue;
        }
        let children = children_of
            .get(category.id.as_str())
            .cloned()
            .unwrap_or_default();
        nodes.push(CategoryNode {
            category: category.clone(),
            children: build_level(children, children_of, placed),
        });
    }
    nodes
}

fn sort_siblings(nodes: &mut [CategoryNode]) {
    nodes.sort_by(|a, b| {
        a.category
            .position
            .cmp(&b.category.position)
            .then_with(|| a.category.name.cmp(&b.category.name))
    });
}

/// Move a category to `new_index` among its siblings.
///
/// Siblings are taken in display order, the category is moved, and every
/// sibling's `position` is renumbered `0..n`. `new_index` past the end moves
/// the category last. Returns the categories whose position changed.
pub fn reorder(categories: &mut [Category], id: &str, new_index: usize) -> Result<Vec<String>> {
    let parent = categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.parent_id.clone())
        .ok_or_else(|| StoreError::NotFound {
            entity: "category",
            id: id.to_string(),
        })?;

    let mut siblings: Vec<usize> = categories
        .iter()
        .enumerate()
        .filter(|(_, c)| c.parent_id == parent)
        .map(|(idx, _)| idx)
        .collect();
    siblings.sort_by(|&a, &b| {
        let (a, b) = (&categories[a], &categories[b]);
        a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name))
    });

    let from = siblings
        .iter()
        .position(|&idx| categories[idx].id == id)
        .unwrap_or_default();
    let moved = siblings.remove(from);
    siblings.insert(new_index.min(siblings.len()), moved);

    let mut changed = Vec::new();
    for (position, idx) in siblings.into_iter().enumerate() {
        let category = &mut categories[idx];
        if category.position != position as u32 {
            category.position = position as u32;
            changed.push(category.id.clone());
        }
    }
    Ok(changed)
}
