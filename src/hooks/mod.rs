pub mod use_comparison;
pub mod use_options;
