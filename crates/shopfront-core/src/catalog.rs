//! # Demo Catalog
//!
//! The built-in product catalog the shop view renders.
//!
//! A real deployment would source products from a backend; the demo ships
//! a fixed grocery assortment so the app is usable out of the box.

use crate::money::Money;
use crate::types::Product;

/// Catalog entries: (sku, name, description, price cents, image).
const ENTRIES: &[(&str, &str, &str, i64, &str)] = &[
    (
        "BEV-1",
        "Sparkling Water 500ml",
        "Lightly carbonated spring water",
        129,
        "images/bev-1.jpg",
    ),
    (
        "BEV-2",
        "Cold Brew Coffee",
        "Slow-steeped, unsweetened",
        349,
        "images/bev-2.jpg",
    ),
    (
        "BEV-3",
        "Orange Juice 1L",
        "Not from concentrate",
        399,
        "images/bev-3.jpg",
    ),
    (
        "SNK-1",
        "Sea Salt Chips",
        "Kettle cooked",
        249,
        "images/snk-1.jpg",
    ),
    (
        "SNK-2",
        "Dark Chocolate Bar",
        "70% cacao",
        299,
        "images/snk-2.jpg",
    ),
    (
        "SNK-3",
        "Trail Mix",
        "Nuts, raisins, chocolate drops",
        449,
        "images/snk-3.jpg",
    ),
    (
        "DRY-1",
        "Spaghetti 500g",
        "Bronze-cut durum wheat",
        189,
        "images/dry-1.jpg",
    ),
    (
        "DRY-2",
        "Basmati Rice 1kg",
        "Aged long grain",
        529,
        "images/dry-2.jpg",
    ),
    (
        "DRY-3",
        "Tomato Passata",
        "Strained Italian tomatoes",
        219,
        "images/dry-3.jpg",
    ),
    (
        "HSH-1",
        "Dish Soap",
        "Citrus scent",
        279,
        "images/hsh-1.jpg",
    ),
    (
        "HSH-2",
        "Paper Towels 2pk",
        "Double ply",
        459,
        "images/hsh-2.jpg",
    ),
    (
        "HSH-3",
        "Sponges 4pk",
        "Non-scratch",
        199,
        "images/hsh-3.jpg",
    ),
];

/// Returns the demo catalog.
pub fn demo_catalog() -> Vec<Product> {
    ENTRIES
        .iter()
        .map(|(sku, name, description, cents, image)| Product {
            sku: (*sku).to_string(),
            name: (*name).to_string(),
            description: Some((*description).to_string()),
            price: Money::from_cents(*cents),
            image: Some((*image).to_string()),
        })
        .collect()
}

/// Looks up a catalog product by SKU (case-insensitive).
pub fn find_by_sku<'a>(catalog: &'a [Product], sku: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.sku.eq_ignore_ascii_case(sku))
}
