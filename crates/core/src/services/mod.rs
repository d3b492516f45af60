pub mod advice_service;
pub mod analytics_service;
pub mod currency_service;
pub mod format;
pub mod portfolio_service;
