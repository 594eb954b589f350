//! The starter catalog created on first start.

use crate::clients::{PageRequest, ProductClient};
use crate::model::ProductCreate;
use crate::product_actor::ProductError;
use rust_decimal::Decimal;
use tracing::info;

fn product(
    name: &str,
    description: &str,
    price: Decimal,
    stock_quantity: u32,
    image_url: Option<&str>,
    category: &str,
) -> ProductCreate {
    ProductCreate {
        name: name.into(),
        description: Some(description.into()),
        price,
        stock_quantity,
        image_url: image_url.map(Into::into),
        category: Some(category.into()),
    }
}

pub fn starter_catalog() -> Vec<ProductCreate> {
    vec![
        product(
            "Laptop Pro X",
            "Powerful laptop for professionals, with 16GB RAM and 512GB SSD.",
            Decimal::new(129999, 2),
            50,
            Some("https://placehold.co/600x400/000000/FFFFFF?text=Laptop+Pro+X"),
            "Electronics",
        ),
        product(
            "Wireless Mouse",
            "Ergonomic wireless mouse with adjustable DPI.",
            Decimal::new(2599, 2),
            200,
            Some("https://placehold.co/600x400/FF0000/FFFFFF?text=Wireless+Mouse"),
            "Accessories",
        ),
        product(
            "Mechanical Keyboard",
            "RGB mechanical keyboard with clicky switches.",
            Decimal::new(8999, 2),
            75,
            Some("https://placehold.co/600x400/00FF00/000000?text=Keyboard"),
            "Accessories",
        ),
        product(
            "USB-C Hub",
            "Multi-port USB-C hub with HDMI, USB 3.0, and SD card reader.",
            Decimal::new(4500, 2),
            150,
            Some("https://placehold.co/600x400/0000FF/FFFFFF?text=USB-C+Hub"),
            "Accessories",
        ),
        product(
            "4K Monitor",
            "27-inch 4K UHD monitor with HDR support.",
            Decimal::new(39999, 2),
            30,
            None,
            "Electronics",
        ),
    ]
}

/// Creates the starter catalog if no product exists yet. Returns how many products were added.
pub async fn seed_if_empty(products: &ProductClient) -> Result<usize, ProductError> {
    let existing = products
        .list_products(PageRequest { skip: 0, limit: 1 })
        .await?;
    if !existing.is_empty() {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    info!("Adding initial product data...");
    let catalog = starter_catalog();
    let count = catalog.len();
    for params in catalog {
        products.create_product(params).await?;
    }
    info!(count, "Seeded starter catalog");
    Ok(count)
}
