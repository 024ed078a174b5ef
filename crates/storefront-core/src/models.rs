//! Storefront resource models.
//!
//! Documents come from a MongoDB-backed API, so identifiers are read from
//! either `_id` or `id`. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Fields a user may change on their own profile.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A product category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// A catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub count_in_stock: u32,
    /// Whether the product accepts a customization (text, colour, artwork).
    #[serde(default)]
    pub customizable: bool,
}

/// Customer customization applied to a print-on-demand item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One line of the shopping cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
}

/// The user's shopping cart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Fulfilment status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_ascii_lowercase())).map_err(|_| {
            crate::error::InvalidInputError::Other {
                message: format!("unknown order status '{}'", s),
            }
            .into()
        })
    }
}

/// One line of an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
}

/// A placed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for placing an order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<CartItem>,
    pub shipping_address: String,
}

/// A user as listed by the admin area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_accepts_mongo_id() {
        let product: Product = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "name": "Custom Mug",
            "price": 12.5,
            "countInStock": 3,
            "customizable": true,
            "__v": 0
        }))
        .unwrap();
        assert_eq!(product.id, "65f0c0ffee");
        assert_eq!(product.count_in_stock, 3);
        assert!(product.customizable);
    }

    #[test]
    fn product_accepts_plain_id() {
        let product: Product =
            serde_json::from_value(json!({ "id": "p1", "name": "Tee", "price": 20.0 })).unwrap();
        assert_eq!(product.id, "p1");
        assert!(product.category.is_none());
    }

    #[test]
    fn cart_item_omits_empty_customization() {
        let item = CartItem {
            product_id: "p1".into(),
            quantity: 1,
            customization: None,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "productId": "p1", "quantity": 1 })
        );
    }

    #[test]
    fn order_status_parses_from_cli_input() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
