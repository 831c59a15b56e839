//! Report aggregation over archived day summaries.
//!
//! Pure functions: the caller fetches the (already filtered) summaries
//! and these compute the figures the reports view displays.

use std::collections::HashMap;

use chrono::{Datelike, Weekday};
use rollcall_core::models::summary::DaySummary;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Sum of each class's most recent enrollment.
    pub total_students: u32,
    /// Mean attendance rate across all summaries, rounded percent.
    pub average_attendance: u32,
    pub total_classes: u32,
    /// Newer-half minus older-half average rate, one decimal.
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassComparison {
    pub class_id: Uuid,
    pub class_name: String,
    pub subject_code: String,
    pub average_attendance: u32,
    pub students: u32,
}

/// Present/absent/late as percentages of all tracked student-days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayBreakdown {
    pub weekday: String,
    pub average_attendance: u32,
    pub days: u32,
}

pub fn summary_stats(summaries: &[DaySummary]) -> SummaryStats {
    let mut latest_enrollment: HashMap<Uuid, (chrono::NaiveDate, u32)> = HashMap::new();
    for s in summaries {
        let entry = latest_enrollment
            .entry(s.class_id)
            .or_insert((s.date, s.total_students));
        if s.date > entry.0 {
            *entry = (s.date, s.total_students);
        }
    }

    SummaryStats {
        total_students: latest_enrollment.values().map(|(_, n)| n).sum(),
        average_attendance: mean_rate(summaries),
        total_classes: latest_enrollment.len() as u32,
        improvement: improvement(summaries),
    }
}

pub fn class_comparison(summaries: &[DaySummary]) -> Vec<ClassComparison> {
    let mut by_class: HashMap<Uuid, Vec<&DaySummary>> = HashMap::new();
    for s in summaries {
        by_class.entry(s.class_id).or_default().push(s);
    }

    let mut comparison: Vec<ClassComparison> = by_class
        .into_values()
        .map(|days| {
            let latest = days
                .iter()
                .max_by_key(|s| s.date)
                .copied()
                .unwrap_or(days[0]);
            let rates: u32 = days.iter().map(|s| s.attendance_rate()).sum();
            ClassComparison {
                class_id: latest.class_id,
                class_name: latest.class_name.clone(),
                subject_code: latest.subject_code.clone(),
                average_attendance: rates / days.len() as u32,
                students: latest.total_students,
            }
        })
        .collect();
    comparison.sort_by(|a, b| a.subject_code.cmp(&b.subject_code));
    comparison
}

pub fn status_distribution(summaries: &[DaySummary]) -> StatusDistribution {
    let total: u32 = summaries.iter().map(|s| s.total_students).sum();
    if total == 0 {
        return StatusDistribution {
            present: 0,
            absent: 0,
            late: 0,
        };
    }
    let percent = |n: u32| (f64::from(n) * 100.0 / f64::from(total)).round() as u32;
    StatusDistribution {
        present: percent(summaries.iter().map(|s| s.present).sum()),
        absent: percent(summaries.iter().map(|s| s.absent).sum()),
        late: percent(summaries.iter().map(|s| s.late).sum()),
    }
}

pub fn weekday_breakdown(summaries: &[DaySummary]) -> Vec<WeekdayBreakdown> {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    WEEK.iter()
        .map(|&weekday| {
            let days: Vec<&DaySummary> = summaries
                .iter()
                .filter(|s| s.date.weekday() == weekday)
                .collect();
            let average = if days.is_empty() {
                0
            } else {
                days.iter().map(|s| s.attendance_rate()).sum::<u32>() / days.len() as u32
            };
            WeekdayBreakdown {
                weekday: weekday_label(weekday).to_string(),
                average_attendance: average,
                days: days.len() as u32,
            }
        })
        .collect()
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn mean_rate(summaries: &[DaySummary]) -> u32 {
    if summaries.is_empty() {
        return 0;
    }
    summaries.iter().map(|s| s.attendance_rate()).sum::<u32>() / summaries.len() as u32
}

fn improvement(summaries: &[DaySummary]) -> f64 {
    if summaries.len() < 2 {
        return 0.0;
    }
    let mut ordered: Vec<&DaySummary> = summaries.iter().collect();
    ordered.sort_by_key(|s| s.date);
    let (older, newer) = ordered.split_at(ordered.len() / 2);
    let mean = |half: &[&DaySummary]| {
        half.iter().map(|s| f64::from(s.attendance_rate())).sum::<f64>() / half.len() as f64
    };
    ((mean(newer) - mean(older)) * 10.0).round() / 10.0
}
