//! Community posts: a build shared with a title, open to up and down votes.

use std::collections::BTreeMap;

use chrono::{serde::ts_milliseconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    modules::builds::{new_id, BuildError, Comment, UserProfile},
    schemas::build::BuildConfiguration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// `1` or `-1`, as stored per voter.
    pub fn value(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Record key. Not part of the stored value.
    #[serde(default, skip_serializing)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub part_list: BuildConfiguration,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Each voter's current vote.
    #[serde(default)]
    pub votes: BTreeMap<String, i64>,
    /// Sum of `votes`.
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn create(
        user_id: &str,
        user_profile: Option<UserProfile>,
        part_list: BuildConfiguration,
        title: &str,
        description: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(now),
            title: title.to_string(),
            description: description.to_string(),
            part_list,
            user_id: user_id.to_string(),
            user_profile,
            created_at: now,
            updated_at: now,
            votes: BTreeMap::new(),
            vote_count: 0,
            comment_count: 0,
            comments: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        user_id: &str,
        title: &str,
        description: &str,
        part_list: BuildConfiguration,
    ) -> Result<(), BuildError> {
        if self.user_id != user_id {
            return Err(BuildError::Unauthorized("update"));
        }

        self.title = title.to_string();
        self.description = description.to_string();
        self.part_list = part_list;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn ensure_can_delete(&self, user_id: &str) -> Result<(), BuildError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(BuildError::Unauthorized("delete"))
        }
    }

    /// Cast `user_id`'s vote, replacing any earlier one. Returns the new vote count.
    pub fn vote(&mut self, user_id: &str, vote: Vote) -> i64 {
        let previous = self
            .votes
            .insert(user_id.to_string(), vote.value())
            .unwrap_or(0);
        self.vote_count = self
            .vote_count
            .saturating_sub(previous)
            .saturating_add(vote.value());
        self.vote_count
    }

    /// `1`, `-1`, or `0` if the user has not voted.
    pub fn user_vote(&self, user_id: &str) -> i64 {
        self.votes.get(user_id).copied().unwrap_or(0)
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
        self.comment_count = self.comment_count.saturating_add(1);
        &self.comments[self.comments.len() - 1]
    }
}

pub fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
