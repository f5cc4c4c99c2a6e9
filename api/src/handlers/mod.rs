pub mod friends;
pub mod notifications;
pub mod users;
