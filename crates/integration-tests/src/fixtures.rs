//! Response bodies shaped like the backend's serializers.
//!
//! Model decimal fields arrive as strings (`"10.00"`); computed totals
//! (`total_price` on cart and order lines, `/cart/total/`) arrive as JSON
//! numbers.

use serde_json::{Value, json};

const CREATED_AT: &str = "2024-03-01T12:00:00Z";

#[must_use]
pub fn product(id: i64, price: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Template {id}"),
        "slug": format!("template-{id}"),
        "description": "A landing page template",
        "category": 1,
        "category_name": "UI Kits",
        "style": 2,
        "style_name": "Minimal",
        "price": price,
        "image": format!("https://cdn.example.com/products/{id}.png"),
        "author": "studio",
        "rating": "4.50",
        "reviews_count": 12,
        "downloads": 340,
        "tags": ["landing", "dark"],
        "is_featured": false,
        "created_at": CREATED_AT
    })
}

#[must_use]
pub fn category(id: i64, slug: &str) -> Value {
    json!({
        "id": id,
        "name": "UI Kits",
        "slug": slug,
        "description": "Component libraries",
        "products_count": 3
    })
}

#[must_use]
pub fn style(id: i64, slug: &str) -> Value {
    json!({
        "id": id,
        "name": "Minimal",
        "slug": slug,
        "description": "",
        "products_count": 5
    })
}

#[must_use]
pub fn product_detail(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Template {id}"),
        "slug": format!("template-{id}"),
        "description": "A landing page template",
        "category": category(1, "ui-kits"),
        "style": null,
        "price": "49.00",
        "image": format!("https://cdn.example.com/products/{id}.png"),
        "author": "studio",
        "rating": "4.50",
        "reviews_count": 12,
        "downloads": 340,
        "tags": [],
        "is_featured": true,
        "created_at": CREATED_AT,
        "updated_at": "2024-03-02T08:30:00+00:00"
    })
}

#[must_use]
pub fn cart_item(id: i64, product_id: i64, quantity: u32, total: f64) -> Value {
    json!({
        "id": id,
        "product": product(product_id, "10.00"),
        "quantity": quantity,
        "total_price": total,
        "created_at": CREATED_AT
    })
}

#[must_use]
pub fn favorite(id: i64, product_id: i64) -> Value {
    json!({
        "id": id,
        "product": product(product_id, "10.00"),
        "created_at": CREATED_AT
    })
}

#[must_use]
pub fn order(id: i64, email: &str) -> Value {
    json!({
        "id": id,
        "user": 7,
        "user_email": "vera@example.com",
        "status": "pending",
        "total_price": "30.00",
        "email": email,
        "items": [{
            "id": 1,
            "product": product(4, "10.00"),
            "quantity": 3,
            "price": "10.00",
            "total_price": 30.0
        }],
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT
    })
}
