//! Author operations.

use crate::client::EtherpadClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{AuthorId, PadIds, Sessions};

impl<T: Transport> EtherpadClient<T> {
    pub fn create_author(&self, name: Option<&str>) -> Result<AuthorId> {
        let mut params = Vec::new();
        if let Some(name) = name {
            params.push(("name", name));
        }
        self.invoke_as("createAuthor", &params)
    }

    /// Return the author mapped to `author_mapper`, creating it on first use.
    /// A given `name` is applied to the author either way.
    pub fn create_author_if_not_exists_for(
        &self,
        author_mapper: &str,
        name: Option<&str>,
    ) -> Result<AuthorId> {
        let mut params = vec![("authorMapper", author_mapper)];
        if let Some(name) = name {
            params.push(("name", name));
        }
        self.invoke_as("createAuthorIfNotExistsFor", &params)
    }

    /// Pads the author has contributed to.
    pub fn list_pads_of_author(&self, author_id: &str) -> Result<PadIds> {
        self.invoke_as("listPadsOfAuthor", &[("authorID", author_id)])
    }

    pub fn list_sessions_of_author(&self, author_id: &str) -> Result<Option<Sessions>> {
        self.invoke_as("listSessionsOfAuthor", &[("authorID", author_id)])
    }
}
