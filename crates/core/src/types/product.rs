//! Catalog records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Errors raised when validating a [`NewProduct`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The name is empty or whitespace only.
    #[error("name cannot be blank")]
    BlankName,
    /// The name is too long.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// An image URL is empty or whitespace only.
    #[error("image {index} is blank")]
    BlankImage {
        /// Position of the offending entry.
        index: usize,
    },
}

/// A catalog entry as stored and served.
///
/// Serializes as `{"_id", "name", "price", "images"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identity.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Ordered image URLs, possibly empty.
    pub images: Vec<String>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Ordered image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewProduct {
    /// Maximum length of a product name.
    pub const MAX_NAME_LENGTH: usize = 200;

    /// Check the fields the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ProductError` for a blank or overlong name or a blank image URL.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::BlankName);
        }
        if self.name.chars().count() > Self::MAX_NAME_LENGTH {
            return Err(ProductError::NameTooLong {
                max: Self::MAX_NAME_LENGTH,
            });
        }
        if let Some(index) = self.images.iter().position(|url| url.trim().is_empty()) {
            return Err(ProductError::BlankImage { index });
        }
        Ok(())
    }

    /// Attach a store-assigned identity.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            images: self.images,
        }
    }
}

/// One page of a catalog listing plus the catalog size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    /// Products on this page, at most `limit` of them.
    pub products: Vec<Product>,
    /// Total number of products in the catalog.
    pub total: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: Price::new(Decimal::new(999, 2)).unwrap(),
            images: vec!["u1.png".to_string()],
        }
    }

    #[test]
    fn test_product_json_shape() {
        let id = ProductId::generate();
        let product = widget().into_product(id);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": id.to_string(),
                "name": "Widget",
                "price": 9.99,
                "images": ["u1.png"],
            })
        );
    }

    #[test]
    fn test_new_product_images_default_to_empty() {
        let parsed: NewProduct =
            serde_json::from_value(json!({"name": "Plain", "price": 1})).unwrap();
        assert!(parsed.images.is_empty());
    }

    #[test]
    fn test_new_product_requires_name_and_price() {
        assert!(serde_json::from_value::<NewProduct>(json!({"price": 1})).is_err());
        assert!(serde_json::from_value::<NewProduct>(json!({"name": "x"})).is_err());
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(widget().validate(), Ok(()));
    }

    #[test]
    fn test_validate_blank_name() {
        let mut product = widget();
        product.name = "   ".to_string();
        assert_eq!(product.validate(), Err(ProductError::BlankName));
    }

    #[test]
    fn test_validate_long_name() {
        let mut product = widget();
        product.name = "n".repeat(NewProduct::MAX_NAME_LENGTH + 1);
        assert!(matches!(
            product.validate(),
            Err(ProductError::NameTooLong { .. })
        ));
    }

    #[test]
    fn test_validate_blank_image() {
        let mut product = widget();
        product.images.push(String::new());
        assert_eq!(
            product.validate(),
            Err(ProductError::BlankImage { index: 1 })
        );
    }
}
