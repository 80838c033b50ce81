use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::BTreeSet;

use crate::core::error::Result;
use crate::features::stats::dtos::JournalStatsDto;

/// One row of history as the stats computation sees it
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatsRow {
    pub date: NaiveDate,
    pub caption: String,
}

/// Service for streak and aggregate statistics
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute statistics over the caller's full history
    pub async fn get_stats(&self, user_id: &str) -> Result<JournalStatsDto> {
        let rows = sqlx::query_as::<_, StatsRow>(
            "SELECT date, caption FROM entries WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(compute_stats(&rows, Utc::now().date_naive()))
    }
}

/// Compute journal statistics over a history of (date, caption) rows.
///
/// Streaks are over date presence, not entry count: any number of entries on
/// one date counts as a single day. The current streak is alive when today
/// or yesterday has an entry, and today's (or yesterday's) entry counts as
/// day 1.
pub fn compute_stats(rows: &[StatsRow], today: NaiveDate) -> JournalStatsDto {
    if rows.is_empty() {
        return JournalStatsDto::zero();
    }

    let dates: BTreeSet<NaiveDate> = rows.iter().map(|r| r.date).collect();

    let current_streak = current_streak(&dates, today);
    let longest_streak = longest_streak(&dates);

    let total_words: usize = rows
        .iter()
        .map(|r| r.caption.split_whitespace().count())
        .sum();
    let average_words_per_entry =
        ((total_words as f64) / (rows.len() as f64)).round() as i64;

    JournalStatsDto {
        total_entries: rows.len() as i64,
        current_streak,
        longest_streak,
        average_words_per_entry,
    }
}

/// Consecutive days with an entry counted backward from the streak anchor
/// (today when it has an entry, otherwise yesterday).
fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> i64 {
    let yesterday = today - Duration::days(1);

    let anchor = if dates.contains(&today) {
        today
    } else if dates.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut check = anchor;
    while dates.contains(&check) {
        streak += 1;
        check -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive unique dates across the whole history
fn longest_streak(dates: &BTreeSet<NaiveDate>) -> i64 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rows(dates: &[&str]) -> Vec<StatsRow> {
        dates
            .iter()
            .map(|s| StatsRow {
                date: d(s),
                caption: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_history_yields_all_zero_stats() {
        let stats = compute_stats(&[], d("2024-01-03"));
        assert_eq!(stats, JournalStatsDto::zero());
    }

    #[test]
    fn test_total_entries_counts_rows_not_dates() {
        let stats = compute_stats(
            &rows(&["2024-01-01", "2024-01-01", "2024-01-02"]),
            d("2024-01-02"),
        );
        assert_eq!(stats.total_entries, 3);
    }

    #[test]
    fn test_three_consecutive_days_ending_today() {
        let stats = compute_stats(
            &rows(&["2024-01-01", "2024-01-02", "2024-01-03"]),
            d("2024-01-03"),
        );
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn test_gap_breaks_longest_streak() {
        let stats = compute_stats(&rows(&["2024-01-01", "2024-01-03"]), d("2024-01-03"));
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn test_single_entry_today_counts_as_streak_day_one() {
        let stats = compute_stats(&rows(&["2024-01-03"]), d("2024-01-03"));
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn test_streak_alive_through_yesterday() {
        let stats = compute_stats(
            &rows(&["2024-01-01", "2024-01-02"]),
            d("2024-01-03"),
        );
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn test_streak_dead_after_two_quiet_days() {
        let stats = compute_stats(
            &rows(&["2024-01-01", "2024-01-02"]),
            d("2024-01-04"),
        );
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_same_day_duplicates_count_once_toward_continuity() {
        // Three entries on the middle day must not break or inflate the run
        let stats = compute_stats(
            &rows(&[
                "2024-01-01",
                "2024-01-02",
                "2024-01-02",
                "2024-01-02",
                "2024-01-03",
            ]),
            d("2024-01-03"),
        );
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_longest_streak_in_the_past_beats_current() {
        let stats = compute_stats(
            &rows(&[
                "2023-12-01",
                "2023-12-02",
                "2023-12-03",
                "2023-12-04",
                "2024-01-03",
            ]),
            d("2024-01-03"),
        );
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 4);
    }

    #[test]
    fn test_streaks_are_never_negative() {
        let stats = compute_stats(&rows(&["2020-06-15"]), d("2024-01-03"));
        assert!(stats.current_streak >= 0);
        assert!(stats.longest_streak >= 0);
    }

    #[test]
    fn test_average_words_rounds_to_nearest() {
        let history = vec![
            StatsRow {
                date: d("2024-01-01"),
                caption: "a b c".to_string(),
            },
            StatsRow {
                date: d("2024-01-02"),
                caption: "d e".to_string(),
            },
        ];
        let stats = compute_stats(&history, d("2024-01-02"));
        // round((3 + 2) / 2) = 3
        assert_eq!(stats.average_words_per_entry, 3);
    }

    #[test]
    fn test_average_words_ignores_extra_whitespace() {
        let history = vec![StatsRow {
            date: d("2024-01-01"),
            caption: "  slow   morning  ".to_string(),
        }];
        let stats = compute_stats(&history, d("2024-01-01"));
        assert_eq!(stats.average_words_per_entry, 2);
    }

    #[test]
    fn test_empty_captions_average_to_zero() {
        let stats = compute_stats(&rows(&["2024-01-01", "2024-01-02"]), d("2024-01-02"));
        assert_eq!(stats.average_words_per_entry, 0);
    }
}
