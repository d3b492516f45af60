pub mod advice;
pub mod bucket;
pub mod currency;
pub mod dashboard;
pub mod history;
pub mod portfolio;
pub mod targets;
