//! Investment commentary attached to prospect properties at read time.
//!
//! Nothing here is persisted. The default [`RandomAnalyzer`] draws a new
//! analysis on every call, so two reads of one prospect disagree.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use time::OffsetDateTime;

use super::repo_types::ProspectProperty;

const INSIGHTS: &[&str] = &[
    "This property shows strong potential for capital appreciation due to its location.",
    "Consider this property for long-term rental income, as demand in this area is stable.",
    "The estimated worth aligns with market trends, suggesting a fair valuation.",
    "Further due diligence on local zoning laws is recommended for this land prospect.",
    "The year of construction indicates potential for renovation projects to increase value.",
    "This commercial property could benefit from a strategic marketing overhaul.",
    "Exploring alternative uses for this material property may maximize returns.",
    "The property's description highlights unique features that could attract niche buyers.",
    "Market analysis indicates a slight undervaluation, presenting a good buying opportunity.",
    "Environmental factors should be thoroughly assessed before development.",
    "This prospect is ideal for a quick flip given current market conditions.",
    "The property's proximity to amenities enhances its appeal for residential development.",
    "Fluctuating material costs in the region suggest a moderate risk.",
    "Consider a mixed-use development approach for this commercial land.",
    "The property's historical significance might add to its value, but also to renovation costs.",
];

const RECOMMENDATIONS: &[&str] = &[
    "Conduct a detailed feasibility study.",
    "Engage with local community planners.",
    "Obtain multiple appraisals.",
    "Explore financing options tailored to this property type.",
    "Develop a comprehensive marketing strategy.",
    "Assess environmental impact.",
    "Consider a joint venture for development.",
    "Review recent comparable sales in the area.",
    "Investigate potential tax incentives.",
    "Perform a structural integrity assessment.",
];

const RISK_FACTORS: &[&str] = &[
    "Market volatility",
    "Regulatory changes",
    "Environmental concerns",
    "Economic downturn",
    "Competition",
    "None identified",
];

fn category_insights(category: &str) -> &'static [&'static str] {
    match category {
        "Residential" => &[
            "Excellent for family living due to nearby schools.",
            "Potential for high rental yield in student housing.",
            "Requires minor cosmetic updates for optimal market appeal.",
        ],
        "Commercial" => &[
            "High foot traffic area, suitable for retail.",
            "Good for office space, but parking might be a concern.",
            "Consider converting to a co-working space.",
        ],
        "Land" => &[
            "Prime location for agricultural development.",
            "Suitable for solar farm installation.",
            "Potential for subdivision into multiple plots.",
        ],
        "Material" => &[
            "High demand for this material in construction.",
            "Logistics for transport need careful planning.",
            "Consider processing this material further for higher value.",
        ],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AiAnalysis {
    pub overall_sentiment: Sentiment,
    pub confidence_score: f64,
    pub key_insights: Vec<String>,
    pub strategic_recommendations: Vec<String>,
    pub risk_factors: String,
    /// Percentage with one decimal, e.g. `"12.4%"`.
    pub estimated_roi: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_analyzed: OffsetDateTime,
}

pub trait ProspectAnalyzer: Send + Sync {
    fn analyze(&self, prospect: &ProspectProperty) -> AiAnalysis;
}

/// Draws every field from a freshly seeded RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAnalyzer;

impl ProspectAnalyzer for RandomAnalyzer {
    fn analyze(&self, prospect: &ProspectProperty) -> AiAnalysis {
        let mut rng = StdRng::from_entropy();
        generate(&mut rng, &prospect.category_name, OffsetDateTime::now_utc())
    }
}

fn pick_strings<R: Rng>(rng: &mut R, pool: &[&str], amount: usize) -> Vec<String> {
    pool.choose_multiple(rng, amount)
        .map(|s| s.to_string())
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn generate<R: Rng>(rng: &mut R, category: &str, now: OffsetDateTime) -> AiAnalysis {
    let general = rng.gen_range(2..=4);
    let mut key_insights = pick_strings(rng, INSIGHTS, general);
    if let Some(extra) = category_insights(category).choose(rng) {
        key_insights.push(extra.to_string());
    }

    let recs = rng.gen_range(1..=3);
    let strategic_recommendations = pick_strings(rng, RECOMMENDATIONS, recs);

    let overall_sentiment = *SENTIMENTS.choose(rng).unwrap_or(&Sentiment::Neutral);
    let confidence_score = round2(rng.gen_range(0.60..=0.99));
    let risk_factors = RISK_FACTORS
        .choose(rng)
        .copied()
        .unwrap_or("None identified")
        .to_string();
    let estimated_roi = format!("{:.1}%", rng.gen_range(5.0..=30.0));

    AiAnalysis {
        overall_sentiment,
        confidence_score,
        key_insights,
        strategic_recommendations,
        risk_factors,
        estimated_roi,
        last_analyzed: now,
    }
}
