pub mod city_selector;
pub mod error_message;
pub mod parameter_selector;
pub mod result_card;

pub use city_selector::CitySelector;
pub use error_message::ErrorMessage;
pub use parameter_selector::ParameterSelector;
pub use result_card::ResultCard;
