//! Day-over-day sentiment trend reconciliation.

use chrono::NaiveDate;
use subpulse_core::CommunitySummary;

/// Set `sentiment_trend` on a summary from that community's stored history.
///
/// `history` holds `(date, sentiment_avg)` pairs for the same community,
/// newest first, covering at most the trailing 30 days. The trend is the
/// current `sentiment_avg` minus the most recent entry dated before the
/// summary's own date: positive means sentiment improved since the last
/// recorded day, negative means it worsened. Gaps in history are fine — the
/// comparison is always against the most recent available entry, not
/// strictly yesterday. Empty history leaves the trend at 0.0.
///
/// Pure function of its two inputs; no side effects.
#[must_use]
pub fn reconcile(
    mut summary: CommunitySummary,
    history: &[(NaiveDate, f64)],
) -> CommunitySummary {
    summary.sentiment_trend = match history.iter().find(|(date, _)| *date < summary.date) {
        Some((_, prior_avg)) => summary.sentiment_avg - prior_avg,
        None => 0.0,
    };
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use subpulse_core::CategoryDistribution;

    const EPSILON: f64 = 1e-9;

    fn summary(sentiment_avg: f64, date: NaiveDate) -> CommunitySummary {
        CommunitySummary {
            community: "a".to_string(),
            date,
            sentiment_avg,
            category_distribution: CategoryDistribution::default(),
            post_count: 1,
            comment_count: 0,
            avg_upvote_ratio: 0.0,
            avg_score: 0.0,
            top_themes: Vec::new(),
            sentiment_trend: 0.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
    }

    #[test]
    fn empty_history_yields_zero_trend() {
        let reconciled = reconcile(summary(0.5, today()), &[]);
        assert!(reconciled.sentiment_trend.abs() < EPSILON);
    }

    #[test]
    fn trend_is_delta_against_yesterday() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let reconciled = reconcile(summary(0.5, today()), &[(yesterday, 0.3)]);
        assert!((reconciled.sentiment_trend - 0.2).abs() < EPSILON);
    }

    #[test]
    fn trend_can_be_negative() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let reconciled = reconcile(summary(-0.1, today()), &[(yesterday, 0.4)]);
        assert!((reconciled.sentiment_trend + 0.5).abs() < EPSILON);
    }

    #[test]
    fn gaps_compare_against_most_recent_available_entry() {
        let five_days_ago = today().checked_sub_days(Days::new(5)).unwrap();
        let twenty_days_ago = today().checked_sub_days(Days::new(20)).unwrap();
        let history = vec![(five_days_ago, 0.1), (twenty_days_ago, 0.9)];

        let reconciled = reconcile(summary(0.3, today()), &history);
        assert!((reconciled.sentiment_trend - 0.2).abs() < EPSILON);
    }

    #[test]
    fn same_day_entries_are_not_prior_history() {
        // A row already stored for today (e.g. an earlier run) must not be
        // compared against itself.
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let history = vec![(today(), 0.7), (yesterday, 0.3)];

        let reconciled = reconcile(summary(0.5, today()), &history);
        assert!((reconciled.sentiment_trend - 0.2).abs() < EPSILON);
    }

    #[test]
    fn reconcile_only_touches_trend() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let original = summary(0.5, today());
        let reconciled = reconcile(original.clone(), &[(yesterday, 0.1)]);

        assert_eq!(reconciled.community, original.community);
        assert_eq!(reconciled.post_count, original.post_count);
        assert!((reconciled.sentiment_avg - original.sentiment_avg).abs() < EPSILON);
        assert!((reconciled.sentiment_trend - 0.4).abs() < EPSILON);
    }
}
