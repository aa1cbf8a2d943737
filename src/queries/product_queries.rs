use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{
        CreateProductRequest, Product, ProductListItem, ProductListQuery, ProductListResponse,
        SortBy, UpdateProductRequest,
    },
    queries::category_queries,
    store::Store,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 9;
const ALLOWED_PAGE_SIZES: [i64; 4] = [9, 18, 27, 36];

pub fn find_by_id(store: &Store, id: i32) -> Result<Product> {
    store
        .products
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
}

/// Turn raw listing parameters into a deterministic, paginated page.
pub fn search_products(store: &Store, params: ProductListQuery) -> Result<ProductListResponse> {
    params.validate()?;

    let sort_by = match params.sort_by.as_deref() {
        None => SortBy::DateDesc,
        Some(value) => SortBy::from_param(value).ok_or_else(|| {
            AppError::validation_field(
                "sort_by",
                "sort_by must be one of name_asc, name_desc, date_asc, date_desc",
            )
        })?,
    };

    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !ALLOWED_PAGE_SIZES.contains(&page_size) {
        return Err(AppError::validation_field(
            "page_size",
            "page_size must be one of 9, 18, 27, 36",
        ));
    }
    let page = params.page.unwrap_or(DEFAULT_PAGE);

    // filter
    let search = params.search.as_deref().map(str::to_lowercase);
    let mut products: Vec<Product> = store
        .products
        .all()
        .into_iter()
        .filter(|p| match search.as_deref() {
            None => true,
            Some(needle) => {
                p.name.to_lowercase().contains(needle)
                    || p.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(needle))
                        .unwrap_or(false)
            }
        })
        .filter(|p| match params.category.as_deref() {
            None => true,
            Some(category) => p.category == category,
        })
        .collect();

    // sort (stable, so equal keys keep insertion order)
    match sort_by {
        SortBy::NameAsc => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortBy::NameDesc => {
            products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        SortBy::DateAsc => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortBy::DateDesc => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    // paginate; an out-of-range page yields an empty slice, not an error
    let total = products.len() as i64;
    let total_pages = (total + page_size - 1) / page_size;
    let offset = (page - 1) * page_size;
    let items: Vec<ProductListItem> = products
        .iter()
        .skip(offset as usize)
        .take(page_size as usize)
        .map(ProductListItem::from)
        .collect();

    Ok(ProductListResponse {
        items,
        total,
        page,
        page_size,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    })
}

/// Create a new product and bump the matching category's count.
pub fn create_product(store: &Store, req: CreateProductRequest) -> Result<Product> {
    req.validate()?;

    let now = Utc::now();
    let product = store.products.insert(|id| Product {
        id,
        name: req.name,
        description: req.description,
        category: req.category,
        image_url: req.image_url,
        additional_images: req.additional_images,
        specifications: req.specifications,
        created_at: now,
        updated_at: now,
    });

    category_queries::update_count_for_label(store, &product.category, 1);
    Ok(product)
}

/// Partially update a product. A category label change moves the product
/// count from the old matching category to the new one.
pub fn update_product(store: &Store, id: i32, req: UpdateProductRequest) -> Result<Product> {
    req.validate()?;
    let existing = find_by_id(store, id)?;

    let label_change = req
        .category
        .as_ref()
        .filter(|new_label| **new_label != existing.category)
        .map(|new_label| (existing.category.clone(), new_label.clone()));

    let updated = store
        .products
        .update(id, |p| {
            if let Some(name) = req.name {
                p.name = name;
            }
            if let Some(description) = req.description {
                p.description = Some(description);
            }
            if let Some(category) = req.category {
                p.category = category;
            }
            if let Some(image_url) = req.image_url {
                p.image_url = Some(image_url);
            }
            if let Some(additional_images) = req.additional_images {
                p.additional_images = additional_images;
            }
            if let Some(specifications) = req.specifications {
                p.specifications = specifications;
            }
            p.updated_at = Utc::now();
        })
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

    if let Some((old_label, new_label)) = label_change {
        category_queries::update_count_for_label(store, &old_label, -1);
        category_queries::update_count_for_label(store, &new_label, 1);
    }

    Ok(updated)
}

/// Delete a product together with its gallery images.
pub fn delete_product(store: &Store, id: i32) -> Result<()> {
    let product = find_by_id(store, id)?;

    store.products.remove(id);
    store.product_images.retain(|img| img.product_id != id);
    category_queries::update_count_for_label(store, &product.category, -1);

    Ok(())
}
