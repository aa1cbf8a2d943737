use std::collections::HashSet;

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{
        CreateProductImageRequest, MAX_IMAGES_PER_PRODUCT, ProductImage, ReorderEntry,
        UpdateProductImageRequest,
    },
    store::Store,
};

pub fn find_by_id(store: &Store, id: i32) -> Result<ProductImage> {
    store
        .product_images
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Product image {} not found", id)))
}

fn images_of(store: &Store, product_id: i32) -> Vec<ProductImage> {
    let mut images: Vec<ProductImage> = store
        .product_images
        .all()
        .into_iter()
        .filter(|img| img.product_id == product_id)
        .collect();
    // display_order ascending, insertion order (id) breaks ties
    images.sort_by(|a, b| a.display_order.cmp(&b.display_order).then(a.id.cmp(&b.id)));
    images
}

fn ensure_product_exists(store: &Store, product_id: i32) -> Result<()> {
    if !store.products.exists(product_id) {
        return Err(AppError::NotFound(format!(
            "Product {} not found",
            product_id
        )));
    }
    Ok(())
}

/// Gallery of a product, in display order.
pub fn find_by_product(store: &Store, product_id: i32) -> Result<Vec<ProductImage>> {
    ensure_product_exists(store, product_id)?;
    Ok(images_of(store, product_id))
}

/// Add a gallery image. When no display_order is given the image goes to
/// the end of the gallery.
pub fn create_image(
    store: &Store,
    product_id: i32,
    req: CreateProductImageRequest,
) -> Result<ProductImage> {
    req.validate()?;
    ensure_product_exists(store, product_id)?;

    let existing = images_of(store, product_id);
    if existing.len() >= MAX_IMAGES_PER_PRODUCT {
        return Err(AppError::BusinessRule(format!(
            "Product {} already has the maximum of {} images",
            product_id, MAX_IMAGES_PER_PRODUCT
        )));
    }

    let display_order = req.display_order.unwrap_or_else(|| {
        existing
            .iter()
            .map(|img| img.display_order)
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
    });

    let now = Utc::now();
    Ok(store.product_images.insert(|id| ProductImage {
        id,
        product_id,
        image_url: req.image_url,
        thumbnail_url: req.thumbnail_url,
        high_res_url: req.high_res_url,
        display_order,
        caption: req.caption,
        alt_text: req.alt_text,
        view_angle: req.view_angle,
        created_at: now,
        updated_at: now,
    }))
}

/// Partially update image metadata.
pub fn update_image(
    store: &Store,
    id: i32,
    req: UpdateProductImageRequest,
) -> Result<ProductImage> {
    req.validate()?;
    find_by_id(store, id)?;

    store
        .product_images
        .update(id, |img| {
            if let Some(image_url) = req.image_url {
                img.image_url = image_url;
            }
            if let Some(thumbnail_url) = req.thumbnail_url {
                img.thumbnail_url = thumbnail_url;
            }
            if let Some(high_res_url) = req.high_res_url {
                img.high_res_url = high_res_url;
            }
            if let Some(display_order) = req.display_order {
                img.display_order = display_order;
            }
            if let Some(caption) = req.caption {
                img.caption = Some(caption);
            }
            if let Some(alt_text) = req.alt_text {
                img.alt_text = alt_text;
            }
            if let Some(view_angle) = req.view_angle {
                img.view_angle = view_angle;
            }
            img.updated_at = Utc::now();
        })
        .ok_or_else(|| AppError::NotFound(format!("Product image {} not found", id)))
}

/// Delete a gallery image. Every product keeps at least one image.
pub fn delete_image(store: &Store, id: i32) -> Result<()> {
    let image = find_by_id(store, id)?;

    let remaining = images_of(store, image.product_id);
    if remaining.len() <= 1 {
        return Err(AppError::BusinessRule(
            "Cannot delete the last remaining image of a product".to_string(),
        ));
    }

    store.product_images.remove(id);
    Ok(())
}

/// Apply a batch of display-order updates to a product's gallery.
///
/// Every referenced image must belong to the product; all ownership
/// checks run before any mutation, so a rejected batch leaves the
/// gallery untouched.
pub fn reorder_images(store: &Store, product_id: i32, entries: &[ReorderEntry]) -> Result<()> {
    ensure_product_exists(store, product_id)?;

    let owned: HashSet<i32> = images_of(store, product_id)
        .iter()
        .map(|img| img.id)
        .collect();
    for entry in entries {
        if !owned.contains(&entry.image_id) {
            return Err(AppError::BusinessRule(format!(
                "Image {} does not belong to product {}",
                entry.image_id, product_id
            )));
        }
    }

    let now = Utc::now();
    for entry in entries {
        store.product_images.update(entry.image_id, |img| {
            img.display_order = entry.display_order;
            img.updated_at = now;
        });
    }

    Ok(())
}
