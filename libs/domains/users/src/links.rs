//! Hypermedia links attached to user representations at response time.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{UserId, UserInfo};
use crate::pagination::PageMeta;

/// Link relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Rel {
    #[serde(rename = "self")]
    SelfRel,
    Edit,
    Delete,
    Info,
    First,
    Prev,
    Next,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub rel: Rel,
    #[schema(example = "http://localhost:8080/api/users/x1")]
    pub href: String,
}

/// Relations of a fetched or listed user
pub const ITEM_RELS: [Rel; 3] = [Rel::SelfRel, Rel::Edit, Rel::Delete];

/// Relations of a user returned by a successful edit
pub const EDITED_RELS: [Rel; 3] = [Rel::SelfRel, Rel::Info, Rel::Delete];

/// Builds absolute hrefs under the public URL of the users collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    /// `base` is the collection URL, e.g. `http://localhost:8080/api/users`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resource URI of a single user. Every item relation points here.
    pub fn location(&self, id: &UserId) -> String {
        format!("{}/{}", self.base, id)
    }

    pub fn item(&self, id: &UserId, rel: Rel) -> Link {
        Link {
            rel,
            href: self.location(id),
        }
    }

    pub fn page(&self, number: usize, size: usize, rel: Rel) -> Link {
        Link {
            rel,
            href: format!("{}?page={}&size={}", self.base, number, size),
        }
    }

    /// Navigation links for a list response.
    ///
    /// `self` is always present, `first`/`last` only when there is more than
    /// one page, `prev`/`next` only when that page exists.
    pub fn page_links(&self, meta: &PageMeta) -> Vec<Link> {
        let mut links = vec![self.page(meta.number, meta.size, Rel::SelfRel)];

        if meta.total_pages > 1 {
            links.push(self.page(0, meta.size, Rel::First));
        }
        if meta.has_previous() {
            links.push(self.page(meta.number - 1, meta.size, Rel::Prev));
        }
        if let Some(next) = meta.next() {
            links.push(self.page(next, meta.size, Rel::Next));
        }
        if meta.total_pages > 1 {
            links.push(self.page(meta.total_pages - 1, meta.size, Rel::Last));
        }

        links
    }
}

/// User representation with its links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResource {
    #[serde(flatten)]
    pub info: UserInfo,
    pub links: Vec<Link>,
}

impl UserResource {
    pub fn link(&self, rel: Rel) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }
}

pub fn attach_links(info: UserInfo, rels: &[Rel], builder: &LinkBuilder) -> UserResource {
    let links = rels.iter().map(|rel| builder.item(&info.id, *rel)).collect();
    UserResource { info, links }
}
