use serde::{Deserialize, Serialize};

use super::repo_types::{Vote, VoteRow};
use crate::{properties::dto::full_name, query::empty_as_none};

#[derive(Debug, Default, Deserialize)]
pub struct VoteListParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub property_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CastVoteRequest {
    pub property_id: Option<i32>,
    pub vote_option_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct VoteView {
    #[serde(flatten)]
    pub vote: Vote,
    pub voter_name: String,
    pub property_title: String,
    pub vote_option_name: String,
}

impl From<VoteRow> for VoteView {
    fn from(row: VoteRow) -> Self {
        Self {
            voter_name: full_name(&row.voter_first_name, &row.voter_last_name),
            vote: row.vote,
            property_title: row.property_title,
            vote_option_name: row.vote_option_name,
        }
    }
}
