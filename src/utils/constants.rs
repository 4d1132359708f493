/// Local storage key holding the serialized signed-in user
pub const USER_CACHE_KEY: &str = "user";

/// Local storage key holding the auth client's persisted session
pub const AUTH_TOKEN_KEY: &str = "sb-auth-token";

/// Tables exposed by the data API
pub const TABLE_USERS: &str = "users";
pub const TABLE_SHIFTS: &str = "shifts";
pub const TABLE_INVENTORY: &str = "inventory";

/// Routes
pub const ROUTE_HOME: &str = "/";
pub const ROUTE_PAYMENT_FAIL: &str = "/payment/fail";
pub const ROUTE_PAYMENT_SUCCESS: &str = "/payment/success";

/// Delay before the payment pages send the user back home
pub const REDIRECT_DELAY_MS: u32 = 5_000;
