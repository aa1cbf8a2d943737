mod categories;
mod health;
mod product_images;
mod products;

use axum::{
    Router,
    routing::{get, put},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    let api = Router::new()
        .route(
            "/product",
            get(products::search_products).post(products::create_product),
        )
        .route(
            "/product/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/product/{id}/image",
            get(product_images::list_images).post(product_images::create_image),
        )
        .route(
            "/product/{id}/image/reorder",
            put(product_images::reorder_images),
        )
        .route(
            "/product-image/{id}",
            get(product_images::get_image)
                .put(product_images::update_image)
                .delete(product_images::delete_image),
        )
        .route(
            "/category",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/category/featured", get(categories::featured_categories))
        .route("/category/tree", get(categories::category_tree))
        .route(
            "/category/slug/{slug}",
            get(categories::get_category_by_slug),
        )
        .route(
            "/category/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api/internal", api)
}
