//! Endpoint paths, relative to the base path of their area.

/// Public: renew the session credential.
pub const REFRESH: &str = "/refresh";

/// Auth: create a session.
pub const LOGIN: &str = "/login";

/// Auth: create an account and a session.
pub const REGISTER: &str = "/register";

/// Auth: end the session.
pub const LOGOUT: &str = "/logout";

/// Auth: the current user's profile.
pub const PROFILE: &str = "/profile";

/// Product: catalog listing; `/products/{id}` for one product.
pub const PRODUCTS: &str = "/products";

/// Product: category listing.
pub const CATEGORIES: &str = "/categories";

/// User: the shopping cart; `/cart/{productId}` for one line.
pub const CART: &str = "/cart";

/// User: own orders. Admin: all orders; `/orders/{id}/status` to update one.
pub const ORDERS: &str = "/orders";

/// Admin: user management; `/users/{id}` for one user.
pub const USERS: &str = "/users";

/// Joins a collection path and an identifier.
pub(crate) fn item(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, id.trim_matches('/'))
}
