//! A pad ID bound to a client.

use crate::client::EtherpadClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{
    AuthorIds, Html, LastEdited, PadUsersCount, PasswordProtection, PublicStatus, ReadOnlyId,
    RevisionsCount, Text,
};

/// Borrowed view of one pad. Every method forwards to the matching
/// `EtherpadClient` method with `pad_id` filled in.
#[derive(Debug)]
pub struct PadHandle<'a, T> {
    client: &'a EtherpadClient<T>,
    pad_id: &'a str,
}

impl<T> Clone for PadHandle<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PadHandle<'_, T> {}

impl<T: Transport> EtherpadClient<T> {
    pub fn pad<'a>(&'a self, pad_id: &'a str) -> PadHandle<'a, T> {
        PadHandle { client: self, pad_id }
    }
}

impl<'a, T: Transport> PadHandle<'a, T> {
    pub fn id(&self) -> &'a str {
        self.pad_id
    }

    pub fn create(&self, text: Option<&str>) -> Result<()> {
        self.client.create_pad(self.pad_id, text)
    }

    pub fn text(&self, rev: Option<u64>) -> Result<Text> {
        self.client.get_text(self.pad_id, rev)
    }

    pub fn set_text(&self, text: &str) -> Result<()> {
        self.client.set_text(self.pad_id, text)
    }

    pub fn html(&self, rev: Option<u64>) -> Result<Html> {
        self.client.get_html(self.pad_id, rev)
    }

    pub fn revisions_count(&self) -> Result<RevisionsCount> {
        self.client.get_revisions_count(self.pad_id)
    }

    pub fn users_count(&self) -> Result<PadUsersCount> {
        self.client.pad_users_count(self.pad_id)
    }

    pub fn delete(&self) -> Result<()> {
        self.client.delete_pad(self.pad_id)
    }

    pub fn read_only_id(&self) -> Result<ReadOnlyId> {
        self.client.get_read_only_id(self.pad_id)
    }

    pub fn set_public_status(&self, public_status: &str) -> Result<()> {
        self.client.set_public_status(self.pad_id, public_status)
    }

    pub fn public_status(&self) -> Result<PublicStatus> {
        self.client.get_public_status(self.pad_id)
    }

    pub fn set_password(&self, password: &str) -> Result<()> {
        self.client.set_password(self.pad_id, password)
    }

    pub fn is_password_protected(&self) -> Result<PasswordProtection> {
        self.client.is_password_protected(self.pad_id)
    }

    pub fn authors(&self) -> Result<AuthorIds> {
        self.client.list_authors_of_pad(self.pad_id)
    }

    pub fn last_edited(&self) -> Result<LastEdited> {
        self.client.get_last_edited(self.pad_id)
    }
}
