use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use super::{ChatId, UserId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub group: bool,
    pub members: Vec<UserId>,
    pub admins: Vec<UserId>,
    /// message payloads are owned by the message service and kept opaque here
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
    pub last_interaction: i64,
    #[serde(default)]
    pub version: u64,
}

impl Chat {
    /// A fresh two-member chat where both participants are admins.
    pub fn pairwise(a: &str, b: &str, now: i64) -> Self {
        let pair = vec![a.to_string(), b.to_string()];
        Self {
            id: nanoid!(),
            group: false,
            members: pair.clone(),
            admins: pair,
            messages: Vec::new(),
            last_interaction: now,
            version: 0,
        }
    }

    /// True when this is a non-group chat whose member set is exactly {a, b}.
    pub fn is_pair_of(&self, a: &str, b: &str) -> bool {
        if self.group || a == b {
            return false;
        }
        let mut members: Vec<&str> = self.members.iter().map(String::as_str).collect();
        members.sort_unstable();
        members.dedup();
        let mut pair = [a, b];
        pair.sort_unstable();
        members == pair
    }

    /// Resets members and admins to the canonical two-element set.
    pub fn canonicalize_pair(&mut self, a: &str, b: &str) {
        let pair = vec![a.to_string(), b.to_string()];
        self.members = pair.clone();
        self.admins = pair;
    }
}
