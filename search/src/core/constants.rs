// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for binaries and log targets)
pub const APP_NAME_LOWER: &str = "search_filters";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE_NAME: &str = "search-filters.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SEARCH_FILTERS_CONFIG";

// =============================================================================
// Environment Variables - Rendering
// =============================================================================

/// Environment variable overriding the SQL backend of the config file
pub const ENV_BACKEND: &str = "SEARCH_FILTERS_BACKEND";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SEARCH_FILTERS_LOG";

// =============================================================================
// Request Parameters
// =============================================================================

/// Suffix marking a repeated request parameter (`tags[]=a`)
pub const LIST_PARAM_SUFFIX: &str = "[]";
