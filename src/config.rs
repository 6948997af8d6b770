/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Country every city and measurement lookup is filtered to
    pub const COUNTRY_CODE: &'static str = "US";

    /// Page size for the city list; large enough to fetch every city at once
    pub const CITY_PAGE_LIMIT: u32 = 100_000;

    /// Page size for the parameter list
    pub const PARAMETER_PAGE_LIMIT: u32 = 1_000;
}
