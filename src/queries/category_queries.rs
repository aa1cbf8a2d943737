use std::collections::{HashMap, HashSet};

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{
        Category, CategoryListQuery, CategoryTree, CategoryWithChildren, CreateCategoryRequest,
        MAX_CATEGORY_LEVEL, UpdateCategoryRequest,
    },
    store::Store,
    utils::slug::generate_slug,
};

/// Find category by ID
pub fn find_by_id(store: &Store, id: i32) -> Result<Category> {
    store
        .categories
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
}

/// Find category by slug
pub fn find_by_slug(store: &Store, slug: &str) -> Result<Category> {
    store
        .category_by_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
}

fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Get categories matching the listing filters (flat list).
///
/// Inactive rows are hidden unless `active_only=false` was requested;
/// `featured` only narrows the result when explicitly true.
pub fn get_all(store: &Store, query: &CategoryListQuery) -> Vec<Category> {
    let active_only = query.active_only.unwrap_or(true);
    let featured_only = query.featured == Some(true);

    let mut categories: Vec<Category> = store
        .categories
        .all()
        .into_iter()
        .filter(|c| query.parent_id.map_or(true, |pid| c.parent_id == Some(pid)))
        .filter(|c| !active_only || c.active)
        .filter(|c| !featured_only || c.featured)
        .collect();

    sort_categories(&mut categories);
    categories
}

/// Get the active, featured categories for homepage promotion.
pub fn get_featured(store: &Store) -> Vec<Category> {
    let mut categories: Vec<Category> = store
        .categories
        .all()
        .into_iter()
        .filter(|c| c.active && c.featured)
        .collect();

    sort_categories(&mut categories);
    categories
}

/// Get category tree (hierarchical structure)
pub fn get_category_tree(store: &Store, active_only: bool) -> CategoryTree {
    let query = CategoryListQuery {
        active_only: Some(active_only),
        ..Default::default()
    };
    let categories = get_all(store, &query);

    // Group categories by parent_id
    let mut children_map: HashMap<Option<i32>, Vec<Category>> = HashMap::new();
    for category in categories {
        children_map
            .entry(category.parent_id)
            .or_default()
            .push(category);
    }

    // Build tree recursively
    fn build_tree(
        parent_id: Option<i32>,
        children_map: &HashMap<Option<i32>, Vec<Category>>,
    ) -> Vec<CategoryWithChildren> {
        children_map
            .get(&parent_id)
            .map(|categories| {
                categories
                    .iter()
                    .map(|cat| CategoryWithChildren {
                        children: build_tree(Some(cat.id), children_map),
                        category: cat.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    let root_categories = build_tree(None, &children_map);

    CategoryTree {
        categories: root_categories,
    }
}

/// Compute the level a category would occupy under the given parent.
pub fn calculate_level(store: &Store, parent_id: Option<i32>) -> Result<i32> {
    let Some(parent_id) = parent_id else {
        return Ok(1);
    };

    let parent = store.categories.get(parent_id).ok_or_else(|| {
        AppError::validation_field(
            "parent_id",
            &format!("Parent category {} does not exist", parent_id),
        )
    })?;

    let level = parent.level + 1;
    if level > MAX_CATEGORY_LEVEL {
        return Err(AppError::BusinessRule(format!(
            "Maximum hierarchy depth of {} exceeded",
            MAX_CATEGORY_LEVEL
        )));
    }

    Ok(level)
}

/// Name must be unique among siblings, compared case-insensitively.
pub fn validate_unique_name_at_level(
    store: &Store,
    name: &str,
    parent_id: Option<i32>,
    exclude_id: Option<i32>,
) -> Result<()> {
    let target = name.to_lowercase();
    let collision = store.categories.all().into_iter().any(|c| {
        Some(c.id) != exclude_id && c.parent_id == parent_id && c.name.to_lowercase() == target
    });

    if collision {
        return Err(AppError::BusinessRule(format!(
            "A category named '{}' already exists at this level",
            name
        )));
    }
    Ok(())
}

/// Slug must be unique across the whole tree.
pub fn validate_unique_slug(store: &Store, slug: &str, exclude_id: Option<i32>) -> Result<()> {
    let collision = store
        .categories
        .all()
        .into_iter()
        .any(|c| Some(c.id) != exclude_id && c.slug == slug);

    if collision {
        return Err(AppError::BusinessRule(format!(
            "A category with slug '{}' already exists",
            slug
        )));
    }
    Ok(())
}

/// Reject a parent assignment that would close a loop in the tree.
///
/// Walks the ancestor chain from the proposed parent with a visited-set
/// so corrupted data cannot send the walk into an infinite loop.
pub fn validate_no_cycle(store: &Store, category_id: i32, new_parent_id: Option<i32>) -> Result<()> {
    let Some(start) = new_parent_id else {
        return Ok(());
    };

    if start == category_id {
        return Err(AppError::BusinessRule(
            "A category cannot be its own parent".to_string(),
        ));
    }

    let mut visited = HashSet::new();
    let mut current = Some(start);
    while let Some(id) = current {
        if id == category_id {
            return Err(AppError::BusinessRule(
                "Cannot move a category under one of its own descendants".to_string(),
            ));
        }
        if !visited.insert(id) {
            return Err(AppError::BusinessRule(
                "Category hierarchy contains a cycle".to_string(),
            ));
        }
        current = store.categories.get(id).and_then(|c| c.parent_id);
    }

    Ok(())
}

/// Apply a product-count delta to a category and every ancestor.
///
/// Counts clamp at zero. The visited-set bounds the walk even if the
/// parent chain is corrupted.
pub fn update_product_count(store: &Store, category_id: i32, delta: i32) {
    let mut visited = HashSet::new();
    let mut current = Some(category_id);
    while let Some(id) = current {
        if !visited.insert(id) {
            break;
        }
        let updated = store.update_category(id, |c| {
            c.product_count = (c.product_count + delta).max(0);
        });
        current = updated.and_then(|c| c.parent_id);
    }
}

/// Propagate a count delta to the category whose name matches a product's
/// free-text label, if there is one. Products are linked to the tree by
/// name only, so a label without a matching category is a no-op.
pub(crate) fn update_count_for_label(store: &Store, label: &str, delta: i32) {
    let target = label.to_lowercase();
    let matched = store
        .categories
        .all()
        .into_iter()
        .find(|c| c.name.to_lowercase() == target);

    if let Some(category) = matched {
        update_product_count(store, category.id, delta);
    }
}

/// Create a new category
pub fn create_category(store: &Store, req: CreateCategoryRequest) -> Result<Category> {
    req.validate()?;

    validate_unique_name_at_level(store, &req.name, req.parent_id, None)?;
    let slug = generate_slug(&req.name);
    if slug.is_empty() {
        return Err(AppError::validation_field(
            "name",
            "name must contain at least one alphanumeric character",
        ));
    }
    validate_unique_slug(store, &slug, None)?;
    let level = calculate_level(store, req.parent_id)?;

    let now = Utc::now();
    Ok(store.add_category(|id| Category {
        id,
        parent_id: req.parent_id,
        name: req.name,
        slug,
        level,
        description: req.description,
        image_url: req.image_url,
        display_order: req.display_order.unwrap_or(0),
        active: req.active.unwrap_or(true),
        featured: req.featured.unwrap_or(false),
        meta_title: req.meta_title,
        meta_description: req.meta_description,
        product_count: 0,
        created_at: now,
        updated_at: now,
    }))
}

/// Update an existing category
///
/// The slug always tracks the effective name, so renaming a category
/// changes its slug.
pub fn update_category(store: &Store, id: i32, req: UpdateCategoryRequest) -> Result<Category> {
    req.validate()?;
    let existing = find_by_id(store, id)?;

    let name = req.name.clone().unwrap_or_else(|| existing.name.clone());
    let parent_id = req.parent_id.or(existing.parent_id);

    validate_unique_name_at_level(store, &name, parent_id, Some(id))?;
    validate_no_cycle(store, id, parent_id)?;
    let slug = generate_slug(&name);
    if slug.is_empty() {
        return Err(AppError::validation_field(
            "name",
            "name must contain at least one alphanumeric character",
        ));
    }
    validate_unique_slug(store, &slug, Some(id))?;
    let level = calculate_level(store, parent_id)?;

    store
        .update_category(id, |c| {
            c.name = name;
            c.slug = slug;
            c.parent_id = parent_id;
            c.level = level;
            if let Some(description) = req.description {
                c.description = Some(description);
            }
            if let Some(image_url) = req.image_url {
                c.image_url = Some(image_url);
            }
            if let Some(display_order) = req.display_order {
                c.display_order = display_order;
            }
            if let Some(active) = req.active {
                c.active = active;
            }
            if let Some(featured) = req.featured {
                c.featured = featured;
            }
            if let Some(meta_title) = req.meta_title {
                c.meta_title = Some(meta_title);
            }
            if let Some(meta_description) = req.meta_description {
                c.meta_description = Some(meta_description);
            }
            c.updated_at = Utc::now();
        })
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
}

/// Delete a category. Children must be deleted or reassigned first.
pub fn delete_category(store: &Store, id: i32) -> Result<()> {
    find_by_id(store, id)?;

    let has_children = store
        .categories
        .all()
        .iter()
        .any(|c| c.parent_id == Some(id));
    if has_children {
        return Err(AppError::BusinessRule(
            "Cannot delete a category that still has child categories".to_string(),
        ));
    }

    store.remove_category(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, parent_id: Option<i32>) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            parent_id,
            description: None,
            image_url: None,
            display_order: None,
            active: None,
            featured: None,
            meta_title: None,
            meta_description: None,
        }
    }

    fn create(store: &Store, name: &str, parent_id: Option<i32>) -> Category {
        create_category(store, request(name, parent_id)).unwrap()
    }

    fn update_request() -> UpdateCategoryRequest {
        UpdateCategoryRequest {
            name: None,
            parent_id: None,
            description: None,
            image_url: None,
            display_order: None,
            active: None,
            featured: None,
            meta_title: None,
            meta_description: None,
        }
    }

    #[test]
    fn create_assigns_defaults_and_level() {
        let store = Store::new();
        let root = create(&store, "Sala de Estar", None);
        assert_eq!(root.level, 1);
        assert_eq!(root.slug, "sala-de-estar");
        assert!(root.active);
        assert!(!root.featured);
        assert_eq!(root.display_order, 0);
        assert_eq!(root.product_count, 0);

        let child = create(&store, "Sofás", Some(root.id));
        assert_eq!(child.level, 2);
        assert_eq!(child.parent_id, Some(root.id));
    }

    #[test]
    fn create_rejects_depth_beyond_three() {
        let store = Store::new();
        let l1 = create(&store, "Sala", None);
        let l2 = create(&store, "Sofás", Some(l1.id));
        let l3 = create(&store, "Retráteis", Some(l2.id));

        let err = create_category(&store, request("Nível 4", Some(l3.id))).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");
    }

    #[test]
    fn create_rejects_missing_parent() {
        let store = Store::new();
        let err = create_category(&store, request("Órfã", Some(99))).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn sibling_names_are_unique_case_insensitively() {
        let store = Store::new();
        let root = create(&store, "Sala", None);
        create(&store, "Sofás", Some(root.id));

        let err = create_category(&store, request("SOFÁS", Some(root.id))).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");

        // Same name under a different parent is allowed, but the derived
        // slug would still collide globally.
        let other = create(&store, "Quarto", None);
        let err = create_category(&store, request("Sofás", Some(other.id))).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");
    }

    #[test]
    fn slugs_are_globally_unique() {
        let store = Store::new();
        create(&store, "Sala & Estar", None);
        // Different name, identical derived slug.
        let err = create_category(&store, request("Sala-Estar", None)).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");
    }

    #[test]
    fn update_rejects_cycles() {
        let store = Store::new();
        let a = create(&store, "A", None);
        let b = create(&store, "B", Some(a.id));
        let c = create(&store, "C", Some(b.id));

        let mut req = update_request();
        req.parent_id = Some(c.id);
        let err = update_category(&store, a.id, req).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");

        let mut req = update_request();
        req.parent_id = Some(b.id);
        let err = update_category(&store, b.id, req).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");
    }

    #[test]
    fn rename_regenerates_slug() {
        let store = Store::new();
        let cat = create(&store, "Escritório", None);
        assert_eq!(cat.slug, "escritorio");

        let mut req = update_request();
        req.name = Some("Home Office".to_string());
        let updated = update_category(&store, cat.id, req).unwrap();
        assert_eq!(updated.slug, "home-office");

        assert!(store.category_by_slug("escritorio").is_none());
        assert_eq!(store.category_by_slug("home-office").unwrap().id, cat.id);
    }

    #[test]
    fn reparent_recomputes_level() {
        let store = Store::new();
        let root = create(&store, "Sala", None);
        let other_root = create(&store, "Quarto", None);
        let child = create(&store, "Sofás", Some(root.id));
        let leaf = create(&store, "Retráteis", Some(child.id));

        // Moving the leaf directly under another root lifts it to level 2.
        let mut req = update_request();
        req.parent_id = Some(other_root.id);
        let moved = update_category(&store, leaf.id, req).unwrap();
        assert_eq!(moved.level, 2);
    }

    #[test]
    fn product_count_propagates_to_ancestors() {
        let store = Store::new();
        let l1 = create(&store, "Sala", None);
        let l2 = create(&store, "Sofás", Some(l1.id));
        let l3 = create(&store, "Retráteis", Some(l2.id));

        update_product_count(&store, l3.id, 1);
        assert_eq!(find_by_id(&store, l3.id).unwrap().product_count, 1);
        assert_eq!(find_by_id(&store, l2.id).unwrap().product_count, 1);
        assert_eq!(find_by_id(&store, l1.id).unwrap().product_count, 1);

        // Deltas clamp at zero rather than going negative.
        update_product_count(&store, l3.id, -5);
        assert_eq!(find_by_id(&store, l3.id).unwrap().product_count, 0);
        assert_eq!(find_by_id(&store, l1.id).unwrap().product_count, 0);
    }

    #[test]
    fn delete_blocked_while_children_exist() {
        let store = Store::new();
        let root = create(&store, "Sala", None);
        let child = create(&store, "Sofás", Some(root.id));

        let err = delete_category(&store, root.id).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_ERROR");

        delete_category(&store, child.id).unwrap();
        delete_category(&store, root.id).unwrap();
        assert!(matches!(
            find_by_id(&store, root.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn listing_filters_and_sorts() {
        let store = Store::new();
        let root = create(&store, "Sala", None);

        let mut req = request("Zebra", Some(root.id));
        req.display_order = Some(2);
        create_category(&store, req).unwrap();

        let mut req = request("Apple", Some(root.id));
        req.display_order = Some(2);
        create_category(&store, req).unwrap();

        let mut req = request("Mango", Some(root.id));
        req.display_order = Some(1);
        req.featured = Some(true);
        create_category(&store, req).unwrap();

        let mut req = request("Oculta", Some(root.id));
        req.active = Some(false);
        create_category(&store, req).unwrap();

        let query = CategoryListQuery {
            parent_id: Some(root.id),
            ..Default::default()
        };
        let names: Vec<String> = get_all(&store, &query).into_iter().map(|c| c.name).collect();
        // display_order ascending, ties broken by name.
        assert_eq!(names, vec!["Mango", "Apple", "Zebra"]);

        let query = CategoryListQuery {
            parent_id: Some(root.id),
            active_only: Some(false),
            ..Default::default()
        };
        assert_eq!(get_all(&store, &query).len(), 4);

        let query = CategoryListQuery {
            parent_id: Some(root.id),
            featured: Some(true),
            ..Default::default()
        };
        let featured: Vec<String> = get_all(&store, &query).into_iter().map(|c| c.name).collect();
        assert_eq!(featured, vec!["Mango"]);
    }

    #[test]
    fn tree_nests_children_under_parents() {
        let store = Store::new();
        let root = create(&store, "Sala", None);
        let child = create(&store, "Sofás", Some(root.id));
        create(&store, "Retráteis", Some(child.id));

        let tree = get_category_tree(&store, true);
        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.categories[0].category.id, root.id);
        assert_eq!(tree.categories[0].children.len(), 1);
        assert_eq!(tree.categories[0].children[0].children.len(), 1);
    }

    #[test]
    fn find_by_slug_resolves_and_misses() {
        let store = Store::new();
        create(&store, "Sala de Estar", None);
        assert_eq!(
            find_by_slug(&store, "sala-de-estar").unwrap().name,
            "Sala de Estar"
        );
        let err = find_by_slug(&store, "nope").unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
