//! Saved builds: the records users persist, vote on and comment under.

use std::collections::BTreeMap;

use chrono::{serde::ts_milliseconds, DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{modules::socket::is_compatible, schemas::build::BuildConfiguration};

/// Why a saved build could not be written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("CPU and motherboard sockets are not compatible")]
    IncompatibleSockets,
    #[error("Build not found: {0}")]
    NotFound(String),
    #[error("Unauthorized to {0} this build")]
    Unauthorized(&'static str),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "photoURL")]
    pub photo_url: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_email: String,
    pub content: String,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedBuild {
    /// Record key. Not part of the stored value.
    #[serde(default, skip_serializing)]
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
    pub config: BuildConfiguration,
    #[serde(default)]
    pub total_price: f64,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub user_votes: BTreeMap<String, bool>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A random hex id whose first 12 digits are the creation time, so ids sort oldest first.
pub(crate) fn new_id(now: DateTime<Utc>) -> String {
    format!(
        "{:012x}{}",
        now.timestamp_millis().max(0),
        hex::encode(rand::random::<[u8; 8]>())
    )
}

/// Reject a configuration whose CPU and motherboard sockets are known to differ.
pub fn check_sockets(config: &BuildConfiguration) -> Result<(), BuildError> {
    if is_compatible(config.cpu.as_ref(), config.motherboard.as_ref()) {
        Ok(())
    } else {
        Err(BuildError::IncompatibleSockets)
    }
}

impl SavedBuild {
    pub fn create(
        user_id: &str,
        user_profile: Option<UserProfile>,
        config: BuildConfiguration,
    ) -> Result<Self, BuildError> {
        check_sockets(&config)?;

        let now = Utc::now();
        let build = Self {
            id: new_id(now),
            user_id: user_id.to_string(),
            user_profile,
            total_price: config.total_price(),
            config,
            created_at: now,
            updated_at: None,
            votes: 0,
            user_votes: BTreeMap::new(),
            comments: Vec::new(),
        };
        log::debug!(
            "created build {} with {} parts",
            build.id,
            build.config.part_count()
        );
        Ok(build)
    }

    /// Replace the configuration, recomputing the total.
    pub fn update(&mut self, user_id: &str, config: BuildConfiguration) -> Result<(), BuildError> {
        check_sockets(&config)?;
        if self.user_id != user_id {
            return Err(BuildError::Unauthorized("update"));
        }

        self.total_price = config.total_price();
        self.config = config;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    pub fn ensure_can_delete(&self, user_id: &str) -> Result<(), BuildError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(BuildError::Unauthorized("delete"))
        }
    }

    /// Flip `user_id`'s vote. Returns whether the user now votes for the build.
    pub fn toggle_vote(&mut self, user_id: &str) -> bool {
        let voted = self.user_votes.get(user_id).copied().unwrap_or(false);
        self.user_votes.insert(user_id.to_string(), !voted);
        self.votes = if voted {
            self.votes.saturating_sub(1)
        } else {
            self.votes + 1
        };
        !voted
    }

    pub fn add_comment(&mut self, user_id: &str, user_email: &str, content: &str) -> &Comment {
        let now = Utc::now();
        self.comments.push(Comment {
            id: new_id(now),
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            content: content.to_string(),
            created_at: now,
        });
        &self.comments[self.comments.len() - 1]
    }
}

pub fn find<'a>(builds: &'a mut [SavedBuild], id: &str) -> Result<&'a mut SavedBuild, BuildError> {
    builds
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| BuildError::NotFound(id.to_string()))
}

pub fn newest_first(builds: &mut [SavedBuild]) {
    builds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub builds: Vec<SavedBuild>,
    /// Pass back to [`page`] to continue with older builds.
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// The newest `limit` builds with an id before `cursor` (all builds without one).
pub fn page(builds: &[SavedBuild], limit: usize, cursor: Option<&str>) -> Page {
    let mut older: Vec<&SavedBuild> = builds
        .iter()
        .filter(|b| cursor.map_or(true, |cursor| b.id.as_str() < cursor))
        .collect();
    older.sort_by(|a, b| a.id.cmp(&b.id));

    let start = older.len().saturating_sub(limit);
    let next_cursor = older.get(start).map(|b| b.id.clone());

    let mut builds: Vec<SavedBuild> = older[start..].iter().map(|b| (*b).clone()).collect();
    newest_first(&mut builds);

    Page {
        has_more: limit > 0 && builds.len() == limit,
        builds,
        next_cursor,
    }
}
