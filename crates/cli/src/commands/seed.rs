//! Catalog seeding command.
//!
//! Inserts products through the same `ProductStore` the API uses, so seeded
//! rows get store-assigned IDs and insertion order like any other product.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use minishop_core::{NewProduct, Price};
use minishop_storefront::db::{self, PgStore, ProductStore};

use super::{CommandError, database_url};

/// Seed the catalog from `file`, or with the demo catalog when `None`.
///
/// Every product is validated before connecting to the database.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a product is
/// invalid, or an insert fails.
pub async fn run(file: Option<&Path>) -> Result<(), CommandError> {
    let products = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading products from file");
            load(path).await?
        }
        None => demo_catalog(),
    };

    for (index, product) in products.iter().enumerate() {
        product
            .validate()
            .map_err(|source| CommandError::InvalidProduct { index, source })?;
    }
    info!(count = products.len(), "Products validated");

    let pool = db::create_pool(&database_url()?).await?;
    let store = PgStore::new(pool);

    for product in products {
        let created = store.insert(product).await?;
        info!(id = %created.id, name = %created.name, "Inserted product");
    }

    info!("Seeding complete!");
    Ok(())
}

async fn load(path: &Path) -> Result<Vec<NewProduct>, CommandError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

    Ok(serde_json::from_str(&content)?)
}

fn demo_catalog() -> Vec<NewProduct> {
    [
        ("Classic Mug", 1250, "mug.jpg"),
        ("Linen Apron", 3000, "apron.jpg"),
        ("Stovetop Kettle", 4500, "kettle.jpg"),
        ("Ceramic Bowl", 825, "bowl.jpg"),
        ("Wooden Spoon", 300, "spoon.jpg"),
    ]
    .into_iter()
    .filter_map(|(name, cents, image)| {
        let price = Price::new(Decimal::new(cents, 2)).ok()?;
        Some(NewProduct {
            name: name.to_string(),
            price,
            images: vec![format!("/images/{image}")],
        })
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_valid() {
        let products = demo_catalog();
        assert_eq!(products.len(), 5);
        for product in &products {
            product.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_load_product_file() {
        let path = std::env::temp_dir().join(format!("minishop-seed-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[{"name": "Widget", "price": 9.99}, {"name": "Gadget", "price": 5, "images": ["g.png"]}]"#,
        )
        .await
        .unwrap();

        let products = load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Widget");
        assert!(products[0].images.is_empty());
        assert_eq!(products[1].images, ["g.png"]);
    }

    #[tokio::test]
    async fn test_missing_file_reported() {
        let err = load(Path::new("/nonexistent/products.json")).await.unwrap_err();
        assert!(matches!(err, CommandError::ReadFile { .. }));
    }
}
