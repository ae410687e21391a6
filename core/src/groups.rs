//! Group operations.
//!
//! Groups own pads (`groupID$padName`) and sessions. `groupMapper` lets an
//! application map its own group identifiers onto server group IDs.

use crate::client::EtherpadClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{GroupId, PadId, PadIds, Sessions};

impl<T: Transport> EtherpadClient<T> {
    /// Create a new, empty group.
    pub fn create_group(&self) -> Result<GroupId> {
        self.invoke_as("createGroup", &[])
    }

    /// Return the group mapped to `group_mapper`, creating it on first use.
    pub fn create_group_if_not_exists_for(&self, group_mapper: &str) -> Result<GroupId> {
        self.invoke_as("createGroupIfNotExistsFor", &[("groupMapper", group_mapper)])
    }

    /// Delete a group together with its pads and sessions.
    pub fn delete_group(&self, group_id: &str) -> Result<()> {
        self.invoke_unit("deleteGroup", &[("groupID", group_id)])
    }

    pub fn list_pads(&self, group_id: &str) -> Result<PadIds> {
        self.invoke_as("listPads", &[("groupID", group_id)])
    }

    /// Create `pad_name` inside the group. Without `text` the server's
    /// default pad text is used. Older servers answer `null` instead of the
    /// new pad's ID.
    pub fn create_group_pad(
        &self,
        group_id: &str,
        pad_name: &str,
        text: Option<&str>,
    ) -> Result<Option<PadId>> {
        let mut params = vec![("groupID", group_id), ("padName", pad_name)];
        if let Some(text) = text {
            params.push(("text", text));
        }
        self.invoke_as("createGroupPad", &params)
    }

    /// Sessions of the group keyed by session ID. Older servers answer `null`
    /// for a group without sessions.
    pub fn list_sessions_of_group(&self, group_id: &str) -> Result<Option<Sessions>> {
        self.invoke_as("listSessionsOfGroup", &[("groupID", group_id)])
    }
}
