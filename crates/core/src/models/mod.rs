pub mod asset;
pub mod category;
pub mod currency;
pub mod history;
pub mod portfolio;
pub mod sale;
pub mod settings;
pub mod stats;
pub mod store;
