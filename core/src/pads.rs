//! Pad content and pad metadata operations.

use crate::client::EtherpadClient;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::{
    AuthorIds, Html, LastEdited, PadUsersCount, PasswordProtection, PublicStatus, ReadOnlyId,
    RevisionsCount, Text,
};

impl<T: Transport> EtherpadClient<T> {
    /// Pad text at `rev`, or at the head revision when `rev` is `None`.
    pub fn get_text(&self, pad_id: &str, rev: Option<u64>) -> Result<Text> {
        let rev = rev.map(|r| r.to_string());
        let mut params = vec![("padID", pad_id)];
        if let Some(rev) = rev.as_deref() {
            params.push(("rev", rev));
        }
        self.invoke_as("getText", &params)
    }

    pub fn set_text(&self, pad_id: &str, text: &str) -> Result<()> {
        self.invoke_unit("setText", &[("padID", pad_id), ("text", text)])
    }

    /// Pad content rendered as HTML, at `rev` or at the head revision.
    pub fn get_html(&self, pad_id: &str, rev: Option<u64>) -> Result<Html> {
        let rev = rev.map(|r| r.to_string());
        let mut params = vec![("padID", pad_id)];
        if let Some(rev) = rev.as_deref() {
            params.push(("rev", rev));
        }
        self.invoke_as("getHTML", &params)
    }

    /// Create a pad outside any group.
    pub fn create_pad(&self, pad_id: &str, text: Option<&str>) -> Result<()> {
        let mut params = vec![("padID", pad_id)];
        if let Some(text) = text {
            params.push(("text", text));
        }
        self.invoke_unit("createPad", &params)
    }

    pub fn get_revisions_count(&self, pad_id: &str) -> Result<RevisionsCount> {
        self.invoke_as("getRevisionsCount", &[("padID", pad_id)])
    }

    /// Number of users currently connected to the pad.
    pub fn pad_users_count(&self, pad_id: &str) -> Result<PadUsersCount> {
        self.invoke_as("padUsersCount", &[("padID", pad_id)])
    }

    pub fn delete_pad(&self, pad_id: &str) -> Result<()> {
        self.invoke_unit("deletePad", &[("padID", pad_id)])
    }

    pub fn get_read_only_id(&self, pad_id: &str) -> Result<ReadOnlyId> {
        self.invoke_as("getReadOnlyID", &[("padID", pad_id)])
    }

    /// Set whether a group pad is readable without a session.
    ///
    /// `public_status` must be exactly `"true"` or `"false"`; anything else is
    /// rejected with `Error::Validation` before a request is made.
    pub fn set_public_status(&self, pad_id: &str, public_status: &str) -> Result<()> {
        if !matches!(public_status, "true" | "false") {
            return Err(Error::validation(format!(
                "publicStatus needs to be \"true\" or \"false\", got {public_status:?}"
            )));
        }
        self.invoke_unit(
            "setPublicStatus",
            &[("padID", pad_id), ("publicStatus", public_status)],
        )
    }

    pub fn get_public_status(&self, pad_id: &str) -> Result<PublicStatus> {
        self.invoke_as("getPublicStatus", &[("padID", pad_id)])
    }

    pub fn set_password(&self, pad_id: &str, password: &str) -> Result<()> {
        self.invoke_unit("setPassword", &[("padID", pad_id), ("password", password)])
    }

    pub fn is_password_protected(&self, pad_id: &str) -> Result<PasswordProtection> {
        self.invoke_as("isPasswordProtected", &[("padID", pad_id)])
    }

    pub fn list_authors_of_pad(&self, pad_id: &str) -> Result<AuthorIds> {
        self.invoke_as("listAuthorsOfPad", &[("padID", pad_id)])
    }

    /// Time of the last edit in milliseconds since the unix epoch.
    pub fn get_last_edited(&self, pad_id: &str) -> Result<LastEdited> {
        self.invoke_as("getLastEdited", &[("padID", pad_id)])
    }
}
