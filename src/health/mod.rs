//! The seven-day health record window supplied to the advice generator.
//!
//! Exactly seven records exist at any time, one per weekday, ordered
//! Monday-to-Sunday. The dashboard mutates "today" in place; records are never
//! deleted or reordered, and the whole week is handed downstream as a fresh
//! snapshot after every edit.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Day label for a record slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Monday-based slot index (Mon = 0 … Sun = 6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// The weekday of the local calendar date.
    pub fn today() -> Self {
        let n = Local::now().weekday().num_days_from_monday() as usize;
        Self::ALL[n]
    }
}

/// One day of tracked metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub day: Weekday,
    pub steps: u32,
    pub sleep_hours: f64,
    pub diet_note: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeekLogError {
    #[error("record at slot {slot} is labeled {found}, expected {expected}")]
    MisplacedDay {
        slot: usize,
        found: Weekday,
        expected: Weekday,
    },
}

/// Ordered Monday-to-Sunday week of records.
///
/// The array is indexed by weekday, which is what enforces "one record per
/// day, never reordered".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekLog {
    records: [HealthRecord; 7],
}

impl WeekLog {
    /// Build a week from pre-ordered records, rejecting misplaced day labels.
    pub fn new(records: [HealthRecord; 7]) -> Result<Self, WeekLogError> {
        for (slot, record) in records.iter().enumerate() {
            let expected = Weekday::ALL[slot];
            if record.day != expected {
                return Err(WeekLogError::MisplacedDay {
                    slot,
                    found: record.day,
                    expected,
                });
            }
        }
        Ok(Self { records })
    }

    /// The dashboard's seed week, shown before the user enters anything.
    pub fn sample_week() -> Self {
        let record = |day, steps, sleep_hours, diet_note: &str| HealthRecord {
            day,
            steps,
            sleep_hours,
            diet_note: diet_note.to_owned(),
        };
        Self {
            records: [
                record(Weekday::Mon, 8200, 7.0, "早餐：鸡蛋；午餐：米饭+蔬菜；晚餐：面条"),
                record(Weekday::Tue, 9000, 6.5, "早餐：燕麦；午餐：炒饭；晚餐：鸡肉沙拉"),
                record(Weekday::Wed, 7600, 8.0, "早餐：牛奶+面包；午餐：面条；晚餐：鱼"),
                record(Weekday::Thu, 10000, 7.5, "早餐：煎蛋；午餐：米饭+蔬菜；晚餐：汤"),
                record(Weekday::Fri, 9400, 6.0, "早餐：豆浆+包子；午餐：面条；晚餐：炒菜"),
                record(Weekday::Sat, 12000, 8.0, "早餐：燕麦+水果；午餐：炒饭；晚餐：鸡胸肉"),
                record(Weekday::Sun, 8800, 7.0, "早餐：牛奶+三明治；午餐：面条；晚餐：沙拉"),
            ],
        }
    }

    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    /// Owned snapshot, handed downstream so later edits don't show through.
    pub fn snapshot(&self) -> Vec<HealthRecord> {
        self.records.to_vec()
    }

    pub fn get(&self, day: Weekday) -> &HealthRecord {
        &self.records[day.index()]
    }

    pub fn today(&self) -> &HealthRecord {
        self.get(Weekday::today())
    }

    /// Update today's record in place.
    ///
    /// Absent fields keep their current value, as do a blank diet note and a
    /// negative or non-finite sleep figure. Matches the dashboard form,
    /// where an empty input means "leave it alone".
    pub fn update_today(
        &mut self,
        steps: Option<u32>,
        sleep_hours: Option<f64>,
        diet_note: Option<String>,
    ) {
        self.update_day(Weekday::today(), steps, sleep_hours, diet_note);
    }

    fn update_day(
        &mut self,
        day: Weekday,
        steps: Option<u32>,
        sleep_hours: Option<f64>,
        diet_note: Option<String>,
    ) {
        let record = &mut self.records[day.index()];
        if let Some(steps) = steps {
            record.steps = steps;
        }
        if let Some(sleep) = sleep_hours {
            if sleep.is_finite() && sleep >= 0.0 {
                record.sleep_hours = sleep;
            }
        }
        if let Some(note) = diet_note {
            if !note.trim().is_empty() {
                record.diet_note = note;
            }
        }
    }
}
