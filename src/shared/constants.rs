/// Default page number for paginated listings
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 3;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

