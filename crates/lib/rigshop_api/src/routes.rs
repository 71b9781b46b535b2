//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";

pub const POST_API_REGISTER: &str = "/api/register";
pub const POST_API_LOGIN: &str = "/api/login";
pub const POST_API_ADMIN_LOGIN: &str = "/api/admin/login";

pub const PRODUCTS: &str = "/api/products";
pub const PRODUCTS_ID: &str = "/api/products/{id}";
pub const PRODUCT_FILTERS: &str = "/api/product-filters";

pub const CART: &str = "/api/cart";
pub const CART_ADD: &str = "/api/cart/add";
pub const CART_UPDATE_ID: &str = "/api/cart/update/{product_id}";
pub const CART_REMOVE_ID: &str = "/api/cart/remove/{product_id}";
pub const CART_APPLY_PROMO: &str = "/api/cart/apply-promo";

pub const CONFIGURATOR_CATEGORIES: &str = "/api/configurator/categories";
pub const CONFIGURATOR_VALIDATE: &str = "/api/configurator/validate";
pub const CONFIGURATOR_SAVE: &str = "/api/configurator/save";
pub const CONFIGURATOR_MY_CONFIGS: &str = "/api/configurator/my-configs";

pub const REVIEWS: &str = "/api/reviews";
pub const REVIEWS_ID: &str = "/api/reviews/{id}";
pub const REVIEWS_ID_STATS: &str = "/api/reviews/{id}/stats";

pub const SUPPORT_TICKETS: &str = "/api/support/tickets";
pub const SUPPORT_TICKETS_ID: &str = "/api/support/tickets/{id}";

pub const ADMIN_PRODUCTS: &str = "/api/admin/products";
pub const ADMIN_PRODUCTS_ID: &str = "/api/admin/products/{id}";
pub const ADMIN_PRODUCT_FILTERS: &str = "/api/admin/product-filters";
pub const ADMIN_PRODUCT_FILTERS_ID: &str = "/api/admin/product-filters/{id}";
pub const ADMIN_PRODUCT_FILTERS_ID_TOGGLE: &str = "/api/admin/product-filters/{id}/toggle";
pub const ADMIN_PROMO_CODES: &str = "/api/admin/promo-codes";
pub const ADMIN_PROMO_CODES_ID: &str = "/api/admin/promo-codes/{id}";
pub const ADMIN_PROMO_CODES_ID_TOGGLE: &str = "/api/admin/promo-codes/{id}/toggle";
pub const ADMIN_SUPPORT_TICKETS: &str = "/api/admin/support/tickets";
pub const ADMIN_SUPPORT_TICKETS_ID_RESPOND: &str = "/api/admin/support/tickets/{id}/respond";
pub const ADMIN_SUPPORT_TICKETS_ID_STATUS: &str = "/api/admin/support/tickets/{id}/status";
