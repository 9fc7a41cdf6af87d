//! Wardrobe catalog
//!
//! Catalog entries are immutable once created; an item's category is fixed
//! and selects the try-on instruction at generation time. The default catalog
//! ships with the application, and custom uploads synthesize a new entry with
//! a creation-time-derived identifier.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Kind of wardrobe item, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardrobeCategory {
    /// Clothing that replaces what the model is wearing
    Garment,
    /// Item added on top of the current outfit
    Accessory,
}

impl WardrobeCategory {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "garment" => Some(Self::Garment),
            "accessory" => Some(Self::Accessory),
            _ => None,
        }
    }
}

impl std::fmt::Display for WardrobeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WardrobeCategory::Garment => write!(f, "garment"),
            WardrobeCategory::Accessory => write!(f, "accessory"),
        }
    }
}

/// Catalog entry for a garment or accessory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Source image reference
    pub image_url: String,
    /// Category, determines the try-on instruction
    pub category: WardrobeCategory,
    /// Display price, not validated
    pub price: String,
    /// Short description
    pub description: String,
}

impl WardrobeItem {
    /// Synthesize an entry for a custom uploaded image
    ///
    /// The identifier is derived from the creation time so repeated uploads
    /// stay distinct.
    pub fn custom(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: format!("custom-{}", Utc::now().timestamp_millis()),
            name: name.into(),
            image_url: image_url.into(),
            category: WardrobeCategory::Garment,
            price: "N/A".to_string(),
            description: "A custom uploaded item.".to_string(),
        }
    }

    /// Override the category (custom uploads default to garment)
    pub fn with_category(mut self, category: WardrobeCategory) -> Self {
        self.category = category;
        self
    }
}

/// The built-in catalog
pub fn default_wardrobe() -> Vec<WardrobeItem> {
    vec![
        WardrobeItem {
            id: "crew-sweatshirt".to_string(),
            name: "Crew Sweatshirt".to_string(),
            image_url:
                "https://raw.githubusercontent.com/ammaarreshi/app-images/refs/heads/main/gemini-sweat-2.png"
                    .to_string(),
            category: WardrobeCategory::Garment,
            price: "KES 7,800".to_string(),
            description: "A cozy and stylish crew-neck sweatshirt with an embroidered logo."
                .to_string(),
        },
        WardrobeItem {
            id: "classic-tee".to_string(),
            name: "Classic T-Shirt".to_string(),
            image_url:
                "https://raw.githubusercontent.com/ammaarreshi/app-images/refs/heads/main/Gemini-tee.png"
                    .to_string(),
            category: WardrobeCategory::Garment,
            price: "KES 3,900".to_string(),
            description: "A classic black t-shirt made from 100% organic cotton.".to_string(),
        },
        WardrobeItem {
            id: "denim-jacket".to_string(),
            name: "Denim Jacket".to_string(),
            image_url: "https://raw.githubusercontent.com/ammaarreshi/app-images/main/denim-jacket.png"
                .to_string(),
            category: WardrobeCategory::Garment,
            price: "KES 11,700".to_string(),
            description:
                "A timeless denim jacket that adds a cool, casual layer to any outfit.".to_string(),
        },
        WardrobeItem {
            id: "leather-jacket".to_string(),
            name: "Leather Jacket".to_string(),
            image_url:
                "https://raw.githubusercontent.com/ammaarreshi/app-images/main/leather-jacket.png"
                    .to_string(),
            category: WardrobeCategory::Garment,
            price: "KES 19,500".to_string(),
            description: "A sleek faux leather jacket. The perfect statement piece for a night out."
                .to_string(),
        },
        WardrobeItem {
            id: "beanie-hat".to_string(),
            name: "Beanie Hat".to_string(),
            image_url: "https://raw.githubusercontent.com/ammaarreshi/app-images/main/beanie.png"
                .to_string(),
            category: WardrobeCategory::Accessory,
            price: "KES 2,600".to_string(),
            description: "Keep warm with this soft, ribbed beanie. A versatile accessory for any season."
                .to_string(),
        },
        WardrobeItem {
            id: "sunglasses".to_string(),
            name: "Aviator Sunglasses".to_string(),
            image_url: "https://raw.githubusercontent.com/ammaarreshi/app-images/main/sunglasses.png"
                .to_string(),
            category: WardrobeCategory::Accessory,
            price: "KES 5,850".to_string(),
            description: "Classic aviator sunglasses with a modern twist. 100% UV protection."
                .to_string(),
        },
    ]
}

/// Look up a catalog item by identifier
pub fn find_item<'a>(items: &'a [WardrobeItem], id: &str) -> Option<&'a WardrobeItem> {
    items.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(WardrobeCategory::parse("garment"), Some(WardrobeCategory::Garment));
        assert_eq!(
            WardrobeCategory::parse("Accessory"),
            Some(WardrobeCategory::Accessory)
        );
        assert_eq!(WardrobeCategory::parse("hat"), None);
    }

    #[test]
    fn test_default_wardrobe_has_both_categories() {
        let items = default_wardrobe();
        assert!(items.iter().any(|i| i.category == WardrobeCategory::Garment));
        assert!(items.iter().any(|i| i.category == WardrobeCategory::Accessory));
    }

    #[test]
    fn test_default_wardrobe_ids_unique() {
        let items = default_wardrobe();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_custom_item_id_is_time_derived() {
        let item = WardrobeItem::custom("My Jacket", "file:///tmp/jacket.png");
        assert!(item.id.starts_with("custom-"));
        assert_eq!(item.category, WardrobeCategory::Garment);
        assert_eq!(item.price, "N/A");
    }

    #[test]
    fn test_custom_item_with_category() {
        let item = WardrobeItem::custom("Scarf", "file:///tmp/scarf.png")
            .with_category(WardrobeCategory::Accessory);
        assert_eq!(item.category, WardrobeCategory::Accessory);
    }

    #[test]
    fn test_find_item() {
        let items = default_wardrobe();
        assert!(find_item(&items, "denim-jacket").is_some());
        assert!(find_item(&items, "missing").is_none());
    }
}
