use tracing::{debug, info};

use abi::errors::{Error, Result};
use abi::model::{Chat, User};
use abi::types::{AcceptOutcome, ChatSummary, SendOutcome, UserSummary};
use db::ChangeSet;

use crate::RelationService;

impl RelationService {
    /// `requester_id` asks `target_id` for friendship.
    ///
    /// When the target has already asked the requester, the two requests meet and the pair
    /// becomes friends right away with a shared chat (`Mutual`). Otherwise the request is
    /// recorded on both sides (`Pending`); repeating it changes nothing.
    pub async fn send_friend_request(
        &self,
        requester_id: &str,
        target_id: &str,
    ) -> Result<SendOutcome> {
        debug!("send friend request: {requester_id} -> {target_id}");
        if requester_id == target_id {
            return Err(Error::invalid_state("cannot send a friend request to yourself"));
        }
        let _guard = self.locks.lock(requester_id, target_id).await;
        self.retrying("send_friend_request", move || {
            self.try_send(requester_id, target_id)
        })
        .await
    }

    /// `accepter_id` accepts the pending request sent by `requester_id`.
    /// Both sides must agree that the request exists, otherwise `NoSuchRequest`.
    pub async fn accept_friend_request(
        &self,
        accepter_id: &str,
        requester_id: &str,
    ) -> Result<AcceptOutcome> {
        debug!("accept friend request: {requester_id} -> {accepter_id}");
        if accepter_id == requester_id {
            return Err(Error::no_such_request("no friend request from yourself"));
        }
        let _guard = self.locks.lock(accepter_id, requester_id).await;
        self.retrying("accept_friend_request", move || {
            self.try_accept(accepter_id, requester_id)
        })
        .await
    }

    async fn try_send(&self, requester_id: &str, target_id: &str) -> Result<SendOutcome> {
        let (mut requester, mut target) = self.load_pair(requester_id, target_id).await?;

        if requester.is_friend(target_id) {
            return Err(Error::invalid_state(format!(
                "{target_id} is already a friend of {requester_id}"
            )));
        }

        // the target asked first: either side recording it is enough to complete the pair
        if target.has_sent_to(requester_id) || requester.has_received_from(target_id) {
            let chat = self.befriend(&mut requester, &mut target).await?;
            info!("{requester_id} and {target_id} requested each other, now friends");
            let summary = ChatSummary::project(&chat, &[requester, target]);
            return Ok(SendOutcome::mutual(summary));
        }

        let sent = requester.record_sent_request(target_id);
        let received = target.record_received_request(requester_id);
        let changes = ChangeSet::new(changed_users(sent, requester, received, target), Vec::new());
        // a repeated request leaves nothing to write
        if !changes.is_empty() {
            self.guarded(self.db.tx.commit(changes)).await?;
            info!("friend request recorded: {requester_id} -> {target_id}");
        }
        Ok(SendOutcome::pending())
    }

    async fn try_accept(&self, accepter_id: &str, requester_id: &str) -> Result<AcceptOutcome> {
        let (mut accepter, mut requester) = self.load_pair(accepter_id, requester_id).await?;

        if !accepter.has_received_from(requester_id) || !requester.has_sent_to(accepter_id) {
            return Err(Error::no_such_request(format!(
                "no friend request from {requester_id} to {accepter_id}"
            )));
        }

        let chat = self.befriend(&mut accepter, &mut requester).await?;
        info!("{accepter_id} accepted {requester_id}");
        let friend = UserSummary::from(&requester);
        let chat = ChatSummary::project(&chat, &[accepter, requester]);
        Ok(AcceptOutcome { friend, chat })
    }

    /// The transition shared by accept and the mutual branch of send: bind the chat,
    /// make both users friends and commit all three records at once.
    async fn befriend(&self, a: &mut User, b: &mut User) -> Result<Chat> {
        let chat = self.bind_chat(a, b).await?;
        a.befriend(&b.id);
        b.befriend(&a.id);
        let changes = ChangeSet::new(vec![a.clone(), b.clone()], vec![chat.clone()]);
        self.guarded(self.db.tx.commit(changes)).await?;
        Ok(chat)
    }

    async fn load_pair(&self, first: &str, second: &str) -> Result<(User, User)> {
        let first = self.find_user(first).await?;
        let second = self.find_user(second).await?;
        Ok((first, second))
    }
}

fn changed_users(first_changed: bool, first: User, second_changed: bool, second: User) -> Vec<User> {
    let mut users = Vec::with_capacity(2);
    if first_changed {
        users.push(first);
    }
    if second_changed {
        users.push(second);
    }
    users
}
