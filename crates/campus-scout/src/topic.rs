//! The closed set of topics a question can be routed to, with the keyword
//! and path tables that drive retrieval for each one.

use crate::error::ScoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of institution information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    About,
    Admissions,
    Academics,
    Fees,
    Placements,
    Facilities,
    Contact,
    General,
}

/// Topics with dedicated pages on the aggregator sites.
const AGGREGATOR_TOPICS: [Topic; 4] = [
    Topic::Placements,
    Topic::Fees,
    Topic::Admissions,
    Topic::Facilities,
];

/// Topics a site survey tries to cover before stopping early.
pub const PRIORITY_TOPICS: [Topic; 4] = [
    Topic::Placements,
    Topic::Fees,
    Topic::Admissions,
    Topic::About,
];

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::About,
        Topic::Admissions,
        Topic::Academics,
        Topic::Fees,
        Topic::Placements,
        Topic::Facilities,
        Topic::Contact,
        Topic::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::About => "about",
            Topic::Admissions => "admissions",
            Topic::Academics => "academics",
            Topic::Fees => "fees",
            Topic::Placements => "placements",
            Topic::Facilities => "facilities",
            Topic::Contact => "contact",
            Topic::General => "general",
        }
    }

    /// Fragments that mark a URL or link label as belonging to this topic.
    pub fn url_keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::Placements => &["placement", "career", "ocs", "tpo", "recruit", "training"],
            Topic::Fees => &["fee", "tuition", "payment", "scholarship"],
            Topic::Admissions => &["admission", "apply", "eligibility", "intake"],
            Topic::About => &["about", "overview", "history"],
            Topic::Facilities => &[
                "hostel",
                "accommodation",
                "campus",
                "infrastructure",
                "facility",
                "amenity",
                "library",
                "mess",
            ],
            Topic::Academics => &["academic", "course", "program"],
            Topic::Contact => &["contact", "address", "location"],
            Topic::General => &[],
        }
    }

    /// Conventional path suffixes probed when no portal is discovered.
    pub fn standard_paths(&self) -> &'static [&'static str] {
        match self {
            Topic::Placements => &["/placements", "/placement", "/careers", "/ocs", "/tpo"],
            Topic::Fees => &["/fees", "/fee-structure", "/tuition"],
            Topic::Admissions => &["/admissions", "/admission", "/apply"],
            Topic::About => &["/about", "/about-us", "/overview"],
            Topic::Facilities => &[
                "/hostels",
                "/facilities",
                "/infrastructure",
                "/campus",
                "/amenities",
                "/campus-life",
            ],
            Topic::Academics => &["/academics", "/courses", "/programs"],
            Topic::Contact => &["/contact", "/contact-us"],
            Topic::General => &[],
        }
    }

    /// Keywords used to route a free-text question to this topic.
    fn question_keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::Fees => &[
                "fee", "cost", "tuition", "payment", "scholarship", "price", "afford", "expense",
                "charges",
            ],
            Topic::Admissions => &[
                "admission",
                "apply",
                "eligibility",
                "entrance",
                "cutoff",
                "requirement",
                "enroll",
                "registration",
                "intake",
            ],
            Topic::Placements => &[
                "placement", "salary", "package", "recruit", "company", "job", "career", "intern",
            ],
            Topic::Academics => &[
                "course",
                "program",
                "degree",
                "curriculum",
                "subject",
                "faculty",
                "professor",
                "department",
                "branch",
                "specialization",
            ],
            Topic::About => &[
                "history",
                "established",
                "founder",
                "accreditation",
                "ranking",
                "recognition",
                "about",
                "overview",
            ],
            Topic::Facilities => &[
                "hostel",
                "library",
                "lab",
                "campus",
                "infrastructure",
                "facility",
                "amenity",
                "sports",
                "canteen",
            ],
            Topic::Contact => &["contact", "address", "location", "phone", "email", "reach", "where"],
            Topic::General => &[],
        }
    }

    /// Whether third-party aggregators publish a page for this topic.
    pub fn aggregator_supported(&self) -> bool {
        AGGREGATOR_TOPICS.contains(self)
    }

    /// True when `haystack` (already lowercased) contains one of this
    /// topic's URL keywords.
    pub fn matches_keywords(&self, haystack: &str) -> bool {
        self.url_keywords().iter().any(|k| haystack.contains(k))
    }

    /// Classify a URL by the first topic whose keyword appears in it.
    pub fn classify_url(url: &str) -> Topic {
        let lower = url.to_lowercase();
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.matches_keywords(&lower))
            .unwrap_or(Topic::General)
    }

    /// Topics a question is about, in table order.
    ///
    /// A question that matches nothing maps to `[About, General]`.
    pub fn detect(question: &str) -> Vec<Topic> {
        let lower = question.to_lowercase();
        let found: Vec<Topic> = Topic::ALL
            .iter()
            .copied()
            .filter(|t| t.question_keywords().iter().any(|k| lower.contains(k)))
            .collect();
        if found.is_empty() {
            vec![Topic::About, Topic::General]
        } else {
            found
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == needle)
            .ok_or(ScoutError::InvalidTopic(needle))
    }
}
