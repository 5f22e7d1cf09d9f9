//! HAL (Hypertext Application Language) envelopes.
//!
//! A resource is serialized as its own fields plus a `_links` map of named
//! relations, each holding an `href`. Every entity exposes exactly two
//! relations: `self` and one related collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Named link relations, serialized in relation-name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// `self -> {base}/{id}` and `{related} -> {related_base}/{id}/{related}`
    pub fn for_entity(base: &str, id: i64, related_base: &str, related: &str) -> Self {
        Self::new()
            .with("self", format!("{}/{}", base, id))
            .with(related, format!("{}/{}/{}", related_base, id, related))
    }

    pub fn with(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.0.insert(rel.to_string(), Link::new(href));
        self
    }
}

/// An entity with its `_links` merged alongside its own fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HalResource<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> HalResource<T> {
    pub fn new(data: T, links: Links) -> Self {
        Self { data, links }
    }
}

/// Entities that know their own link set
pub trait HalLinks {
    fn links(&self) -> Links;

    fn into_hal(self) -> HalResource<Self>
    where
        Self: Sized,
    {
        let links = self.links();
        HalResource::new(self, links)
    }
}

/// Wrap every item of a collection
pub fn hal_collection<T: HalLinks>(items: Vec<T>) -> Vec<HalResource<T>> {
    items.into_iter().map(HalLinks::into_hal).collect()
}
