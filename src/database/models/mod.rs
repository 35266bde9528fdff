pub mod community;
pub mod rewards;
pub mod sponsor;
pub mod support;
pub mod tournament;
pub mod training;
pub mod user;
pub mod video;
pub mod wearable;
