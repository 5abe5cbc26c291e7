use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// How often a recurring schedule fires.
///
/// Persisted data may carry tags this build does not know; those round-trip
/// losslessly through [`Frequency::Other`] instead of failing deserialization,
/// and the materialization engine reports them without touching the schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Unrecognized tag, preserved verbatim.
    Other(String),
}

impl Frequency {
    /// Next occurrence strictly after `from`, or `None` for an unknown tag.
    ///
    /// Daily and weekly steps are whole days; monthly and yearly steps add
    /// calendar months and clamp the day when the target month is shorter,
    /// so a schedule anchored on the 31st fires on Feb 28 (29 in leap years).
    pub fn next_occurrence(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Frequency::Daily => from.checked_add_signed(Duration::days(1)),
            Frequency::Weekly => from.checked_add_signed(Duration::days(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
            Frequency::Yearly => from.checked_add_months(Months::new(12)),
            Frequency::Other(_) => None,
        }
    }
}

impl From<String> for Frequency {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            "yearly" => Frequency::Yearly,
            _ => Frequency::Other(tag),
        }
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Daily => "daily".to_string(),
            Frequency::Weekly => "weekly".to_string(),
            Frequency::Monthly => "monthly".to_string(),
            Frequency::Yearly => "yearly".to_string(),
            Frequency::Other(tag) => tag,
        }
    }
}
