use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::models::{Category, Product, ProductImage};

/// One entity table: id-keyed rows plus a sequential id counter.
///
/// A `BTreeMap` keeps iteration in id order, which doubles as insertion
/// order since ids are assigned sequentially. List queries rely on that
/// for deterministic tie-breaking under stable sorts.
pub struct Table<T> {
    inner: RwLock<TableInner<T>>,
}

struct TableInner<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Table {
            inner: RwLock::new(TableInner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert a new row, handing the assigned id to the builder.
    pub fn insert(&self, build: impl FnOnce(i32) -> T) -> T {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i32) -> Option<T> {
        self.inner.read().rows.get(&id).cloned()
    }

    pub fn exists(&self, id: i32) -> bool {
        self.inner.read().rows.contains_key(&id)
    }

    /// Apply a mutation in place and return the updated row.
    pub fn update(&self, id: i32, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut inner = self.inner.write();
        let row = inner.rows.get_mut(&id)?;
        apply(row);
        Some(row.clone())
    }

    pub fn remove(&self, id: i32) -> Option<T> {
        self.inner.write().rows.remove(&id)
    }

    /// Drop every row failing the predicate, returning how many were removed.
    pub fn retain(&self, keep: impl FnMut(&T) -> bool) -> usize {
        let mut keep = keep;
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|_, row| keep(row));
        before - inner.rows.len()
    }

    /// Snapshot of all rows in id order.
    pub fn all(&self) -> Vec<T> {
        self.inner.read().rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().rows.is_empty()
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Table::new()
    }
}

/// Shared in-memory store backing the whole catalog.
///
/// One table per entity, plus a secondary slug index for categories.
/// Locks guard individual map accesses only; there is no cross-call
/// transaction or conflict detection (single-process, low-concurrency
/// administrative use).
pub struct Store {
    pub categories: Table<Category>,
    pub products: Table<Product>,
    pub product_images: Table<ProductImage>,
    slug_index: RwLock<HashMap<String, i32>>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            categories: Table::new(),
            products: Table::new(),
            product_images: Table::new(),
            slug_index: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a category and register its slug.
    pub fn add_category(&self, build: impl FnOnce(i32) -> Category) -> Category {
        let category = self.categories.insert(build);
        self.slug_index
            .write()
            .insert(category.slug.clone(), category.id);
        category
    }

    /// Mutate a category, keeping the slug index in sync.
    pub fn update_category(
        &self,
        id: i32,
        apply: impl FnOnce(&mut Category),
    ) -> Option<Category> {
        let old = self.categories.get(id)?;
        let updated = self.categories.update(id, apply)?;
        if old.slug != updated.slug {
            let mut index = self.slug_index.write();
            index.remove(&old.slug);
            index.insert(updated.slug.clone(), id);
        }
        Some(updated)
    }

    pub fn remove_category(&self, id: i32) -> Option<Category> {
        let category = self.categories.remove(id)?;
        self.slug_index.write().remove(&category.slug);
        Some(category)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<Category> {
        let id = *self.slug_index.read().get(slug)?;
        self.categories.get(id)
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}
