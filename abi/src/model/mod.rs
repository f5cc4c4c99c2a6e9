mod chat;
mod notification;
mod user;

pub use chat::*;
pub use notification::*;
pub use user::*;

pub type UserId = String;
pub type ChatId = String;
pub type NotificationId = String;

/// Inserts `id` unless it is already present, keeping insertion order.
/// Returns false when the set was left untouched, so repeating the call is a no-op.
pub fn set_insert(set: &mut Vec<String>, id: &str) -> bool {
    if set.iter().any(|item| item == id) {
        return false;
    }
    set.push(id.to_string());
    true
}

/// Removes every occurrence of `id`; absent ids leave the set untouched.
pub fn set_remove(set: &mut Vec<String>, id: &str) -> bool {
    let before = set.len();
    set.retain(|item| item != id);
    before != set.len()
}
