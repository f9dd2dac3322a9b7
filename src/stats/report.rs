//! Response shapes for the statistics endpoints and the vote tally.

use serde::Serialize;
use time::OffsetDateTime;

use super::repo::{OptionCount, PlatformCounts, RecentProperty};
use crate::properties::dto::full_name;

#[derive(Debug, Serialize, PartialEq)]
pub struct OptionStat {
    pub option_name: String,
    pub vote_option_id: i32,
    pub vote_count: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PropertyStats {
    pub statistics: Vec<OptionStat>,
    pub total_votes: i64,
}

/// Percentages are rounded to two decimals and are 0 when nobody voted.
/// Sorted by count descending, then option name.
pub fn tally(counts: Vec<OptionCount>) -> PropertyStats {
    let total_votes: i64 = counts.iter().map(|c| c.vote_count).sum();

    let mut statistics: Vec<OptionStat> = counts
        .into_iter()
        .map(|c| OptionStat {
            percentage: percentage(c.vote_count, total_votes),
            option_name: c.option_name,
            vote_option_id: c.vote_option_id,
            vote_count: c.vote_count,
        })
        .collect();
    statistics.sort_by(|a, b| {
        b.vote_count
            .cmp(&a.vote_count)
            .then_with(|| a.option_name.cmp(&b.option_name))
    });

    PropertyStats {
        statistics,
        total_votes,
    }
}

fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((count as f64 / total as f64) * 10_000.0).round() / 100.0
}

#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub id: i32,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl From<RecentProperty> for RecentActivity {
    fn from(p: RecentProperty) -> Self {
        Self {
            user_name: full_name(&p.first_name, &p.last_name),
            id: p.id,
            title: p.title,
            created_at: p.created_at,
            kind: "property_added",
            first_name: p.first_name,
            last_name: p.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_properties: i64,
    pub total_votes: i64,
    pub total_images: i64,
    pub total_prospect_properties: i64,
    pub recent_activity: Vec<RecentActivity>,
}

impl PlatformStats {
    pub fn new(counts: PlatformCounts, recent: Vec<RecentProperty>) -> Self {
        Self {
            total_users: counts.total_users,
            total_properties: counts.total_properties,
            total_votes: counts.total_votes,
            total_images: counts.total_images,
            total_prospect_properties: counts.total_prospect_properties,
            recent_activity: recent.into_iter().map(RecentActivity::from).collect(),
        }
    }
}
