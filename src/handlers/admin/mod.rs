pub mod sponsors;
pub mod tickets;
pub mod users;
pub mod videos;
