//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! Identity is business-key based: a product is identified by its SKU
//! everywhere (catalog, cart lines, commands, persisted snapshots).

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A product available in the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stock Keeping Unit - the business identifier.
    pub sku: String,

    /// Display name shown in the shop and cart views.
    pub name: String,

    /// Optional description for the product detail line.
    pub description: Option<String>,

    /// Unit price (integer cents).
    pub price: Money,

    /// Asset path of the product image, relative to the app root.
    ///
    /// Rendering is the views' concern; the domain only carries the path.
    pub image: Option<String>,
}

impl Product {
    /// Creates a product with just the fields every entry needs.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            sku: sku.into(),
            name: name.into(),
            description: None,
            price,
            image: None,
        }
    }
}
