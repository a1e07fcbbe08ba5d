use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{AnalyzerConfig, TimingConfig};

pub const DEFAULT_TIMEZONE: &str = "UTC";
const OPTIMAL_HOUR_SCORE: f64 = 0.9;
const SCORE_DECAY_PER_HOUR: f64 = 0.1;
const SCORE_FLOOR: f64 = 0.3;
const FALLBACK_HOUR: u8 = 9;
const NIGHT_HOURS: [u8; 7] = [0, 1, 2, 3, 4, 5, 23];
const MINUTES_PER_DAY: i64 = 24 * 60;

const GENERAL_REASONING: [&str; 4] = [
    "Weekday evenings (5-8 PM) typically see highest engagement",
    "Tuesday-Thursday are generally the best days for posting",
    "Weekend mornings and afternoons can work well for casual content",
    "Avoid posting between midnight and 6 AM in your target audience timezone",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// 0 is Sunday.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown day of week: {0}")]
pub struct ParseWeekdayError(String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.label() == wanted || day.label()[..3] == wanted)
            .ok_or_else(|| ParseWeekdayError(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceActivity {
    Low,
    Medium,
    High,
    Peak,
}

impl AudienceActivity {
    pub fn is_favorable(self) -> bool {
        matches!(self, AudienceActivity::High | AudienceActivity::Peak)
    }

    pub fn label(self) -> &'static str {
        match self {
            AudienceActivity::Low => "low",
            AudienceActivity::Medium => "medium",
            AudienceActivity::High => "high",
            AudienceActivity::Peak => "peak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingMoment {
    pub day: Weekday,
    pub hour: u8,
    pub minute: u8,
}

impl PostingMoment {
    pub fn new(day: Weekday, hour: u8, minute: u8) -> Self {
        Self {
            day,
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// UTC moment for seconds since the Unix epoch, which fell on a Thursday.
    pub fn from_unix_seconds(seconds: u64) -> Self {
        let days = seconds / 86_400;
        let of_day = seconds % 86_400;
        Self {
            day: Weekday::from_index(((days + 4) % 7) as usize),
            hour: (of_day / 3_600) as u8,
            minute: ((of_day % 3_600) / 60) as u8,
        }
    }

    fn minute_of_day(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalHour {
    pub hour: u8,
    pub score: u32,
    pub engagement_multiplier: f64,
    pub audience_activity: AudienceActivity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecommendation {
    pub day: Weekday,
    pub best_hours: Vec<u8>,
    pub overall_score: u32,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingRecommendation {
    pub optimal_hours: Vec<OptimalHour>,
    pub timezone: String,
    pub day_of_week: Vec<DayRecommendation>,
    pub reasoning: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingSlot {
    pub day: Weekday,
    pub hour: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingAnalysis {
    pub current_time: PostingMoment,
    pub timezone: String,
    pub is_optimal_time: bool,
    pub current_score: u32,
    pub next_optimal_time: PostingSlot,
    pub next_optimal_score: u32,
    pub wait_time_minutes: u32,
    pub recommendation: String,
}

#[derive(Debug, Clone)]
pub struct TimingAdvisor {
    config: TimingConfig,
}

impl Default for TimingAdvisor {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl TimingAdvisor {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            config: config.timing.clone(),
        }
    }

    pub fn optimal_hours(&self, day: Weekday) -> Vec<u8> {
        let config = &self.config;
        let groups = if day.is_weekend() {
            [
                &config.weekend_morning,
                &config.weekend_afternoon,
                &config.weekend_evening,
            ]
        } else {
            [
                &config.weekday_morning,
                &config.weekday_lunch,
                &config.weekday_evening,
            ]
        };
        let mut hours: Vec<u8> = groups.into_iter().flatten().copied().collect();
        hours.sort_unstable();
        hours.dedup();
        hours
    }

    fn peak_hours(&self, day: Weekday) -> &[u8] {
        if day.is_weekend() {
            &self.config.weekend_afternoon
        } else {
            &self.config.weekday_evening
        }
    }

    pub fn day_multiplier(&self, day: Weekday) -> f64 {
        let multipliers = &self.config.day_multipliers;
        match day {
            Weekday::Sunday => multipliers.sunday,
            Weekday::Monday => multipliers.monday,
            Weekday::Tuesday => multipliers.tuesday,
            Weekday::Wednesday => multipliers.wednesday,
            Weekday::Thursday => multipliers.thursday,
            Weekday::Friday => multipliers.friday,
            Weekday::Saturday => multipliers.saturday,
        }
    }

    pub fn hour_score(&self, hour: u8, day: Weekday) -> f64 {
        let distance = self
            .optimal_hours(day)
            .iter()
            .map(|optimal| optimal.abs_diff(hour))
            .min();
        let base = match distance {
            Some(distance) => {
                (OPTIMAL_HOUR_SCORE - f64::from(distance) * SCORE_DECAY_PER_HOUR).max(SCORE_FLOOR)
            }
            None => SCORE_FLOOR,
        };
        base * self.day_multiplier(day)
    }

    pub fn activity(&self, hour: u8, day: Weekday) -> AudienceActivity {
        if self.optimal_hours(day).contains(&hour) {
            if self.peak_hours(day).contains(&hour) {
                AudienceActivity::Peak
            } else {
                AudienceActivity::High
            }
        } else if NIGHT_HOURS.contains(&hour) {
            AudienceActivity::Low
        } else {
            AudienceActivity::Medium
        }
    }

    pub fn day_reasoning(&self, day: Weekday) -> &'static str {
        let multiplier = self.day_multiplier(day);
        if multiplier >= 1.05 {
            "Peak engagement day - professionals are active and engaged"
        } else if multiplier >= 1.0 {
            "Good engagement day with steady audience activity"
        } else if day.is_weekend() {
            "Lower business engagement but good for casual content"
        } else {
            "Moderate engagement - consider timing your posts carefully"
        }
    }

    pub fn recommend(&self, timezone: &str, today: Weekday) -> TimingRecommendation {
        let optimal_hours = (0..24u8)
            .filter_map(|hour| {
                let audience_activity = self.activity(hour, today);
                if !audience_activity.is_favorable() {
                    return None;
                }
                let average = Weekday::ALL
                    .iter()
                    .map(|day| self.hour_score(hour, *day))
                    .sum::<f64>()
                    / Weekday::ALL.len() as f64;
                Some(OptimalHour {
                    hour,
                    score: to_points(average),
                    engagement_multiplier: (average * 100.0).round() / 100.0,
                    audience_activity,
                })
            })
            .collect();

        let day_of_week = Weekday::ALL
            .iter()
            .map(|day| DayRecommendation {
                day: *day,
                best_hours: self.optimal_hours(*day),
                overall_score: to_points(self.day_multiplier(*day)),
                reasoning: self.day_reasoning(*day).to_string(),
            })
            .collect();

        TimingRecommendation {
            optimal_hours,
            timezone: timezone_or_default(timezone),
            day_of_week,
            reasoning: GENERAL_REASONING.iter().map(|line| line.to_string()).collect(),
        }
    }

    pub fn at(&self, moment: PostingMoment, timezone: &str) -> TimingAnalysis {
        let is_optimal_time = self.activity(moment.hour, moment.day).is_favorable();

        let next_optimal_time = match self
            .optimal_hours(moment.day)
            .into_iter()
            .find(|hour| *hour > moment.hour)
        {
            Some(hour) => PostingSlot {
                day: moment.day,
                hour,
            },
            None => {
                let day = moment.day.next();
                let hour = self
                    .optimal_hours(day)
                    .first()
                    .copied()
                    .unwrap_or(FALLBACK_HOUR);
                PostingSlot { day, hour }
            }
        };

        let day_offset = if next_optimal_time.day == moment.day {
            0
        } else {
            MINUTES_PER_DAY
        };
        let wait = day_offset + i64::from(next_optimal_time.hour) * 60 - moment.minute_of_day();
        let wait = u32::try_from(wait.max(0)).unwrap_or(0);

        let (wait_time_minutes, recommendation) = if is_optimal_time {
            (0, "Now is a great time to post!".to_string())
        } else {
            (
                wait,
                format!("Consider waiting {} minutes for better engagement", wait),
            )
        };

        TimingAnalysis {
            current_time: moment,
            timezone: timezone_or_default(timezone),
            is_optimal_time,
            current_score: to_points(self.hour_score(moment.hour, moment.day)),
            next_optimal_time,
            next_optimal_score: to_points(
                self.hour_score(next_optimal_time.hour, next_optimal_time.day),
            ),
            wait_time_minutes,
            recommendation,
        }
    }
}

fn to_points(value: f64) -> u32 {
    (value * 100.0).round().max(0.0) as u32
}

fn timezone_or_default(timezone: &str) -> String {
    let trimmed = timezone.trim();
    if trimmed.is_empty() {
        DEFAULT_TIMEZONE.to_string()
    } else {
        trimmed.to_string()
    }
}
