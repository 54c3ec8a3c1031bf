// Shared test helpers: canned requests, small catalogs and scripted transports.
//
// This module provides common utilities used across multiple test files to reduce duplication.

#![allow(dead_code)] // Each test file uses a different subset

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use publish_fanout::{
    Catalog, Category, Destination, DestinationKind, PublishConfig, PublishError, PublishTransport,
};

/// A valid request publishing `posts` posts per destination.
pub fn request(posts: u32) -> PublishConfig {
    PublishConfig {
        video_url: "https://vimeo.com/76979871".into(),
        title: "Launch video".into(),
        description: Some("Our new product in two minutes".into()),
        posts_per_site: posts,
        ..Default::default()
    }
}

/// A catalog of generic sites named after `names`, in order.
pub fn catalog(names: &[&str]) -> Catalog {
    Catalog::new(
        names
            .iter()
            .map(|name| {
                Destination::new(
                    *name,
                    format!("https://{}.example.com", name.to_lowercase()),
                    Category::News,
                    DestinationKind::Site,
                )
            })
            .collect(),
    )
}

/// What a [`ScriptedTransport`] does for one destination.
#[derive(Clone, Copy, Debug)]
pub enum Behaviour {
    Succeed,
    Reject,
    Fatal,
    Panic,
}

/// Transport whose outcome is fixed per destination name (default: succeed).
///
/// Counts calls per destination so tests can check retry bounds.
pub struct ScriptedTransport {
    behaviours: HashMap<String, Behaviour>,
    calls: Mutex<HashMap<String, u32>>,
    total: AtomicU32,
}

impl ScriptedTransport {
    pub fn new(behaviours: &[(&str, Behaviour)]) -> Self {
        Self {
            behaviours: behaviours
                .iter()
                .map(|(name, b)| (name.to_string(), *b))
                .collect(),
            calls: Mutex::new(HashMap::new()),
            total: AtomicU32::new(0),
        }
    }

    pub fn calls_for(&self, name: &str) -> u32 {
        self.calls
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublishTransport for ScriptedTransport {
    async fn publish_once(
        &self,
        destination: &Destination,
        _config: &PublishConfig,
        _post_index: u32,
    ) -> Result<(), PublishError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .unwrap()
            .entry(destination.name.clone())
            .or_insert(0) += 1;

        match self
            .behaviours
            .get(&destination.name)
            .copied()
            .unwrap_or(Behaviour::Succeed)
        {
            Behaviour::Succeed => Ok(()),
            Behaviour::Reject => Err(PublishError::Rejected("try again later".into())),
            Behaviour::Fatal => Err(PublishError::Fatal("session crashed".into())),
            Behaviour::Panic => panic!("adapter bug"),
        }
    }
}
