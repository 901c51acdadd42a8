// shopfront/src/models/category.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub parent_id: Option<i64>,
  pub is_active: bool,
  pub sort_order: i32,
}

/// A top-level category with its direct children.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryNode {
  #[serde(flatten)]
  pub category: Category,
  pub children: Vec<Category>,
}

/// Every active category ordered by name.
pub fn active_by_name(categories: &[Category]) -> Vec<Category> {
  let mut active: Vec<Category> = categories.iter().filter(|c| c.is_active).cloned().collect();
  active.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
  active
}

/// Active root categories ordered by name.
pub fn active_roots_by_name(categories: &[Category]) -> Vec<Category> {
  let mut roots: Vec<Category> = categories
    .iter()
    .filter(|c| c.is_active && c.parent_id.is_none())
    .cloned()
    .collect();
  roots.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
  roots
}

/// Active root categories ordered by `sort_order`, each with its active children,
/// truncated to `limit` roots.
pub fn active_tree(categories: &[Category], limit: usize) -> Vec<CategoryNode> {
  let mut roots: Vec<&Category> = categories
    .iter()
    .filter(|c| c.is_active && c.parent_id.is_none())
    .collect();
  roots.sort_by_key(|c| (c.sort_order, c.id));

  roots
    .into_iter()
    .take(limit)
    .map(|root| {
      let mut children: Vec<Category> = categories
        .iter()
        .filter(|c| c.is_active && c.parent_id == Some(root.id))
        .cloned()
        .collect();
      children.sort_by_key(|c| (c.sort_order, c.id));
      CategoryNode {
        category: root.clone(),
        children,
      }
    })
    .collect()
}
