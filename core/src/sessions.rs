//! Session operations.

use crate::client::EtherpadClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{SessionId, SessionInfo};

impl<T: Transport> EtherpadClient<T> {
    /// Open a session for `author_id` in `group_id`, valid until the unix
    /// timestamp `valid_until` (seconds).
    pub fn create_session(&self, group_id: &str, author_id: &str, valid_until: u64) -> Result<SessionId> {
        let valid_until = valid_until.to_string();
        self.invoke_as(
            "createSession",
            &[
                ("groupID", group_id),
                ("authorID", author_id),
                ("validUntil", valid_until.as_str()),
            ],
        )
    }

    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        self.invoke_unit("deleteSession", &[("sessionID", session_id)])
    }

    pub fn get_session_info(&self, session_id: &str) -> Result<SessionInfo> {
        self.invoke_as("getSessionInfo", &[("sessionID", session_id)])
    }
}
