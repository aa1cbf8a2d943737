//! Demo furniture catalog loaded at startup when `SEED_DEMO_DATA` is set.
//!
//! Everything goes through the public create functions so slugs, levels
//! and product counts are derived exactly as they would be over the API.

use crate::{
    error::Result,
    models::{
        CreateCategoryRequest, CreateProductImageRequest, CreateProductRequest,
        ProductSpecifications, ViewAngle,
    },
    queries::{category_queries, product_image_queries, product_queries},
    store::Store,
};

fn category(
    name: &str,
    parent_id: Option<i32>,
    display_order: i32,
    featured: bool,
    description: &str,
) -> CreateCategoryRequest {
    CreateCategoryRequest {
        name: name.to_string(),
        parent_id,
        description: Some(description.to_string()),
        image_url: Some(format!(
            "https://cdn.mobilia.example/categories/{}.jpg",
            crate::utils::slug::generate_slug(name)
        )),
        display_order: Some(display_order),
        active: Some(true),
        featured: Some(featured),
        meta_title: Some(format!("{} | Mobília", name)),
        meta_description: Some(description.to_string()),
    }
}

fn product(
    name: &str,
    category: &str,
    description: &str,
    dimensions: &str,
    material: &str,
) -> CreateProductRequest {
    let slug = crate::utils::slug::generate_slug(name);
    CreateProductRequest {
        name: name.to_string(),
        description: Some(description.to_string()),
        category: category.to_string(),
        image_url: Some(format!("https://cdn.mobilia.example/products/{}.jpg", slug)),
        additional_images: vec![format!(
            "https://cdn.mobilia.example/products/{}-alt.jpg",
            slug
        )],
        specifications: ProductSpecifications {
            dimensions: Some(dimensions.to_string()),
            material: Some(material.to_string()),
        },
    }
}

fn gallery_image(product_name: &str, view_angle: ViewAngle, suffix: &str) -> CreateProductImageRequest {
    let slug = crate::utils::slug::generate_slug(product_name);
    CreateProductImageRequest {
        image_url: format!("https://cdn.mobilia.example/gallery/{}-{}.jpg", slug, suffix),
        thumbnail_url: format!(
            "https://cdn.mobilia.example/gallery/{}-{}-thumb.jpg",
            slug, suffix
        ),
        high_res_url: format!(
            "https://cdn.mobilia.example/gallery/{}-{}-hd.jpg",
            slug, suffix
        ),
        display_order: None,
        caption: None,
        alt_text: format!("{} ({})", product_name, suffix),
        view_angle,
    }
}

pub fn seed_demo_data(store: &Store) -> Result<()> {
    let sala = category_queries::create_category(
        store,
        category("Sala de Estar", None, 1, true, "Sofás, mesas e estantes para a sala"),
    )?;
    let quarto = category_queries::create_category(
        store,
        category("Quarto", None, 2, true, "Camas e guarda-roupas"),
    )?;
    let escritorio = category_queries::create_category(
        store,
        category("Escritório", None, 3, false, "Móveis para home office"),
    )?;

    category_queries::create_category(
        store,
        category("Sofás", Some(sala.id), 1, true, "Sofás fixos e retráteis"),
    )?;
    category_queries::create_category(
        store,
        category("Mesas de Centro", Some(sala.id), 2, false, "Mesas de centro e laterais"),
    )?;
    category_queries::create_category(
        store,
        category("Camas", Some(quarto.id), 1, false, "Camas box e estofadas"),
    )?;
    category_queries::create_category(
        store,
        category("Guarda-Roupas", Some(quarto.id), 2, false, "Guarda-roupas e cômodas"),
    )?;
    category_queries::create_category(
        store,
        category(
            "Cadeiras de Escritório",
            Some(escritorio.id),
            1,
            false,
            "Cadeiras ergonômicas e giratórias",
        ),
    )?;

    let products = [
        product(
            "Sofá Oslo 3 Lugares",
            "Sofás",
            "Sofá fixo de três lugares com almofadas soltas",
            "210 x 95 x 88 cm",
            "Tecido suede, estrutura de eucalipto",
        ),
        product(
            "Sofá Retrátil Midtown",
            "Sofás",
            "Assento retrátil e encosto reclinável em três posições",
            "230 x 105 x 90 cm",
            "Linho, espuma D33",
        ),
        product(
            "Mesa de Centro Lund",
            "Mesas de Centro",
            "Tampo redondo com prateleira inferior",
            "80 x 80 x 45 cm",
            "Carvalho maciço",
        ),
        product(
            "Mesa Lateral Ipê",
            "Mesas de Centro",
            "Mesa de apoio compacta para sofá",
            "45 x 45 x 55 cm",
            "Ipê, acabamento natural",
        ),
        product(
            "Cama Box Casal Haven",
            "Camas",
            "Base box com baú e cabeceira estofada",
            "158 x 198 x 110 cm",
            "Madeira reflorestada, corino",
        ),
        product(
            "Cama Solteiro Nórdica",
            "Camas",
            "Estilo escandinavo com pés em madeira clara",
            "96 x 203 x 100 cm",
            "Pinus, laca branca",
        ),
        product(
            "Guarda-Roupa Turim 6 Portas",
            "Guarda-Roupas",
            "Seis portas de giro e duas gavetas internas",
            "270 x 58 x 223 cm",
            "MDP, puxadores em alumínio",
        ),
        product(
            "Cadeira Ergonômica Vertex",
            "Cadeiras de Escritório",
            "Apoio lombar regulável e braços 3D",
            "65 x 65 x 120 cm",
            "Tela mesh, base de nylon",
        ),
    ];

    for request in products {
        let name = request.name.clone();
        let created = product_queries::create_product(store, request)?;
        product_image_queries::create_image(
            store,
            created.id,
            gallery_image(&name, ViewAngle::Front, "front"),
        )?;
        product_image_queries::create_image(
            store,
            created.id,
            gallery_image(&name, ViewAngle::Angle, "angle"),
        )?;
        product_image_queries::create_image(
            store,
            created.id,
            gallery_image(&name, ViewAngle::Detail, "detail"),
        )?;
    }

    Ok(())
}
