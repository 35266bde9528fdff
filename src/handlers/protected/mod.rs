pub mod auth;
pub mod community;
pub mod dashboard;
pub mod marketplace;
pub mod profile;
pub mod rewards;
pub mod sponsor;
pub mod support;
pub mod tournaments;
pub mod training;
pub mod videos;
pub mod wearables;
