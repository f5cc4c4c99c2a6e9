mod notification_handlers;

pub use notification_handlers::*;
