//! Storefront API client.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use storefront_core::models::{
    Cart, CartItem, Category, NewOrder, Order, OrderStatus, Profile, ProfileUpdate, Product,
    UserSummary,
};
use storefront_core::{ApiUrl, Area, AreaPaths, Credentials, Registration, RequestDescriptor, Result};

use crate::cookies::SessionStore;
use crate::endpoints::{
    CART, CATEGORIES, LOGIN, LOGOUT, ORDERS, PRODUCTS, PROFILE, REGISTER, USERS, item,
};
use crate::instance::ApiInstance;
use crate::recovery::RecoveryPolicy;
use crate::transport::HttpTransport;

/// Default timeout applied to every request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL.
    pub api: ApiUrl,
    /// Base path of each resource area.
    pub paths: AreaPaths,
    /// Per-request timeout; `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Attach the session credential to requests.
    pub forward_credentials: bool,
}

impl ClientConfig {
    /// Configuration with default area paths and a 30 second timeout.
    pub fn new(api: ApiUrl) -> Self {
        Self {
            api,
            paths: AreaPaths::default(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!("storefront/", env!("CARGO_PKG_VERSION")).to_string(),
            forward_credentials: true,
        }
    }

    pub fn with_paths(mut self, paths: AreaPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Session-aware client for every storefront resource area.
///
/// All instances share one [`SessionStore`]. Requests through the auth,
/// admin, user and product instances renew the session once on 401/403.
///
/// # Thread Safety
///
/// The client is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    config: Arc<ClientConfig>,
    store: Arc<SessionStore>,
    policy: Arc<RecoveryPolicy>,
    auth: ApiInstance,
    admin: ApiInstance,
    user: ApiInstance,
    product: ApiInstance,
    public: ApiInstance,
}

impl StorefrontClient {
    /// Create a client with an empty session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store = Arc::new(SessionStore::new(&config.api));
        Self::with_store(config, store)
    }

    /// Create a client over an existing (possibly restored) session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_store(config: ClientConfig, store: Arc<SessionStore>) -> Result<Self> {
        let transport = |area: Area| -> Result<Arc<HttpTransport>> {
            let base = config.api.endpoint(config.paths.get(area), "");
            let transport = HttpTransport::new(
                base,
                &store,
                config.forward_credentials,
                config.timeout,
                &config.user_agent,
            )?;
            Ok(Arc::new(transport))
        };

        let public_transport = transport(Area::Public)?;
        let policy = Arc::new(RecoveryPolicy::new(public_transport.clone()));
        let instance = |area: Area, transport: Arc<HttpTransport>| {
            if area.is_authenticated() {
                ApiInstance::with_policy(area, transport, policy.clone())
            } else {
                ApiInstance::new(area, transport)
            }
        };

        debug!(
            api = %config.api,
            forward_credentials = config.forward_credentials,
            "Storefront client created"
        );

        Ok(Self {
            auth: instance(Area::Auth, transport(Area::Auth)?),
            admin: instance(Area::Admin, transport(Area::Admin)?),
            user: instance(Area::User, transport(Area::User)?),
            product: instance(Area::Product, transport(Area::Product)?),
            public: instance(Area::Public, public_transport),
            policy,
            store,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiUrl {
        &self.config.api
    }

    /// Returns the shared session credential store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Returns the instance for an area.
    pub fn instance(&self, area: Area) -> &ApiInstance {
        match area {
            Area::Auth => &self.auth,
            Area::Admin => &self.admin,
            Area::User => &self.user,
            Area::Product => &self.product,
            Area::Public => &self.public,
        }
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Create a session; the server's cookies land in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the API is unreachable.
    #[instrument(skip(self, credentials), fields(email = credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Profile> {
        info!("Logging in");
        let profile: Profile = self.auth.post(LOGIN, credentials).await?;
        debug!(user = %profile.id, "Session created");
        Ok(profile)
    }

    /// Create an account and its session.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the registration.
    #[instrument(skip(self, registration), fields(email = registration.email()))]
    pub async fn register(&self, registration: &Registration) -> Result<Profile> {
        info!("Registering account");
        self.auth.post(REGISTER, registration).await
    }

    /// End the session.
    ///
    /// The local store is cleared even when the server call fails, so a
    /// stale credential is never kept after logout.
    ///
    /// # Errors
    ///
    /// Returns the server call's error after clearing the store.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");
        let result = self.auth.send(&RequestDescriptor::post(LOGOUT)).await;
        self.store.clear();
        if let Err(ref error) = result {
            warn!(%error, "Server logout failed; local session cleared");
        }
        result.map(|_| ())
    }

    /// Fetch the current user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no valid session.
    pub async fn profile(&self) -> Result<Profile> {
        self.auth.get(PROFILE).await
    }

    /// Renew the session credential explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RenewalDenied`](storefront_core::error::AuthError)
    /// if the server refuses.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        self.policy.renew().await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// List catalog products, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn products(&self, category: Option<&str>) -> Result<Vec<Product>> {
        let mut request = RequestDescriptor::get(PRODUCTS);
        if let Some(category) = category {
            request = request.with_query("category", category);
        }
        self.product.json(&request).await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    pub async fn product(&self, id: &str) -> Result<Product> {
        self.product.get(&item(PRODUCTS, id)).await
    }

    /// List product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.product.get(CATEGORIES).await
    }

    // ========================================================================
    // User
    // ========================================================================

    /// Update the current user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the update.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        self.user.put(PROFILE, update).await
    }

    /// Fetch the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cart(&self) -> Result<Cart> {
        self.user.get(CART).await
    }

    /// Add a line to the cart, returning the updated cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the item.
    #[instrument(skip(self, line), fields(product = %line.product_id))]
    pub async fn add_to_cart(&self, line: &CartItem) -> Result<Cart> {
        self.user.post(CART, line).await
    }

    /// Remove a product from the cart, returning the updated cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_from_cart(&self, product_id: &str) -> Result<Cart> {
        self.user
            .json(&RequestDescriptor::delete(item(CART, product_id)))
            .await
    }

    /// List the current user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.user.get(ORDERS).await
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the order.
    #[instrument(skip(self, order), fields(lines = order.items.len()))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<Order> {
        info!("Placing order");
        self.user.post(ORDERS, order).await
    }

    // ========================================================================
    // Admin
    // ========================================================================

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lacks admin rights.
    pub async fn users(&self) -> Result<Vec<UserSummary>> {
        self.admin.get(USERS).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lacks admin rights.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.admin.delete(&item(USERS, id)).await
    }

    /// List every order in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lacks admin rights.
    pub async fn all_orders(&self) -> Result<Vec<Order>> {
        self.admin.get(ORDERS).await
    }

    /// Change an order's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lacks admin rights.
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order> {
        let path = format!("{}/status", item(ORDERS, id));
        self.admin
            .patch(&path, &serde_json::json!({ "status": status }))
            .await
    }
}
