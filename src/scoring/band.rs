use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative achievement band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "Fully Achieved")]
    FullyAchieved,
    #[serde(rename = "Largely Achieved")]
    LargelyAchieved,
    #[serde(rename = "Partially Achieved")]
    PartiallyAchieved,
    #[serde(rename = "Not Achieved")]
    NotAchieved,
}

/// Bands in match order with their inclusive bounds. Adjacent ranges share
/// an endpoint; the earlier entry wins.
pub const BANDS: [(Band, f64, f64); 4] = [
    (Band::FullyAchieved, 86.0, 100.0),
    (Band::LargelyAchieved, 51.0, 86.0),
    (Band::PartiallyAchieved, 16.0, 51.0),
    (Band::NotAchieved, 0.0, 16.0),
];

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::FullyAchieved => "Fully Achieved",
            Band::LargelyAchieved => "Largely Achieved",
            Band::PartiallyAchieved => "Partially Achieved",
            Band::NotAchieved => "Not Achieved",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First band whose range contains `score`, or `None` outside [0, 100].
pub fn classify(score: f64) -> Option<Band> {
    BANDS
        .iter()
        .find(|(_, min, max)| *min <= score && score <= *max)
        .map(|(band, _, _)| *band)
}
