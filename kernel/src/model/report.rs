use crate::model::{
    access::duration_in_minutes,
    id::SpaceId,
    space::Space,
};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyReport {
    pub space_id: SpaceId,
    pub space_name: String,
    pub space_code: String,
    pub capacity: i32,
    pub current_occupancy: i64,
    pub occupancy_rate: f64,
    pub total_accesses_today: i64,
    pub total_accesses_this_week: i64,
    pub total_accesses_this_month: i64,
    pub average_duration_in_minutes: f64,
}

/// Time ranges a report counts over, all inclusive on both ends.
///
/// "Today" is the calendar day of `now` in its own time zone; week and month
/// are rolling windows ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    pub now: DateTime<Utc>,
    pub today_start: DateTime<Utc>,
    pub today_end: DateTime<Utc>,
    pub week_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
}

impl ReportWindows {
    pub fn anchored_at<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let day = now.date_naive();
        let today_start = day
            .and_time(NaiveTime::MIN)
            .and_local_timezone(tz.clone())
            .earliest()
            .map(|t| t.with_timezone(&Utc));
        let today_end = day
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .and_then(|t| t.and_local_timezone(tz).latest())
            .map(|t| t.with_timezone(&Utc));

        let now = now.with_timezone(&Utc);
        Self {
            now,
            today_start: today_start.unwrap_or(now),
            today_end: today_end.unwrap_or(now),
            week_start: now - Duration::days(WEEK_DAYS),
            month_start: now - Duration::days(MONTH_DAYS),
        }
    }

    /// Earliest instant any window reaches back to.
    pub fn lower_bound(&self) -> DateTime<Utc> {
        self.today_start.min(self.month_start)
    }

    /// Latest instant any window reaches forward to.
    pub fn upper_bound(&self) -> DateTime<Utc> {
        self.today_end.max(self.now)
    }

    fn is_today(&self, t: DateTime<Utc>) -> bool {
        self.today_start <= t && t <= self.today_end
    }

    fn is_this_week(&self, t: DateTime<Utc>) -> bool {
        self.week_start <= t && t <= self.now
    }

    fn is_this_month(&self, t: DateTime<Utc>) -> bool {
        self.month_start <= t && t <= self.now
    }
}

/// Entry and exit instants of one access record.
#[derive(Debug, Clone, Copy)]
pub struct AccessSpan {
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
}

impl OccupancyReport {
    pub fn compute(
        space: &Space,
        current_occupancy: i64,
        spans: &[AccessSpan],
        windows: &ReportWindows,
    ) -> Self {
        let count = |pred: &dyn Fn(DateTime<Utc>) -> bool| {
            spans.iter().filter(|s| pred(s.entry_time)).count() as i64
        };
        let month_durations: Vec<i64> = spans
            .iter()
            .filter(|s| windows.is_this_month(s.entry_time))
            .filter_map(|s| duration_in_minutes(s.entry_time, s.exit_time))
            .collect();

        Self {
            space_id: space.space_id,
            space_name: space.name.clone(),
            space_code: space.code.clone(),
            capacity: space.capacity,
            current_occupancy,
            occupancy_rate: occupancy_rate(current_occupancy, space.capacity),
            total_accesses_today: count(&|t| windows.is_today(t)),
            total_accesses_this_week: count(&|t| windows.is_this_week(t)),
            total_accesses_this_month: count(&|t| windows.is_this_month(t)),
            average_duration_in_minutes: round2(mean(&month_durations)),
        }
    }
}

/// Percentage of capacity in use, rounded to two decimals and clamped to
/// `[0, 100]`. Zero capacity yields zero.
pub fn occupancy_rate(current_occupancy: i64, capacity: i32) -> f64 {
    if capacity <= 0 || current_occupancy <= 0 {
        return 0.0;
    }
    let rate = current_occupancy as f64 / f64::from(capacity) * 100.0;
    round2(rate.min(100.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<i64>() as f64 / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{occupancy::tests::space, space::SpaceStatus};
    use chrono::FixedOffset;
    use rstest::rstest;

    fn local_now() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 15, 30, 0)
            .unwrap()
    }

    fn span(entry: DateTime<Utc>, minutes: Option<i64>) -> AccessSpan {
        AccessSpan {
            entry_time: entry,
            exit_time: minutes.map(|m| entry + Duration::minutes(m)),
        }
    }

    #[rstest]
    #[case(1, 30, 3.33)]
    #[case(2, 3, 66.67)]
    #[case(1, 8, 12.5)]
    #[case(30, 30, 100.0)]
    #[case(0, 30, 0.0)]
    #[case(5, 0, 0.0)]
    #[case(31, 30, 100.0)]
    fn rate_is_rounded_and_bounded(#[case] occupancy: i64, #[case] capacity: i32, #[case] expected: f64) {
        assert_eq!(occupancy_rate(occupancy, capacity), expected);
    }

    #[test]
    fn today_follows_the_local_calendar_day() {
        let windows = ReportWindows::anchored_at(local_now());
        // 00:00 at UTC-3 is 03:00 UTC.
        assert_eq!(
            windows.today_start,
            Utc.with_ymd_and_hms(2024, 6, 12, 3, 0, 0).unwrap()
        );
        assert!(windows.today_end > windows.now);
        assert_eq!(windows.week_start, windows.now - Duration::days(7));
        assert_eq!(windows.month_start, windows.now - Duration::days(30));
        assert_eq!(windows.lower_bound(), windows.month_start);
        assert_eq!(windows.upper_bound(), windows.today_end);
    }

    #[test]
    fn report_with_one_active_and_one_completed_visit() {
        let windows = ReportWindows::anchored_at(local_now());
        let room = space(30, SpaceStatus::Occupied);
        let spans = [
            span(windows.now - Duration::minutes(20), None),
            span(windows.now - Duration::days(3), Some(60)),
        ];

        let report = OccupancyReport::compute(&room, 1, &spans, &windows);
        assert_eq!(report.current_occupancy, 1);
        assert_eq!(report.occupancy_rate, 3.33);
        assert_eq!(report.average_duration_in_minutes, 60.0);
        assert_eq!(report.total_accesses_today, 1);
        assert_eq!(report.total_accesses_this_week, 2);
        assert_eq!(report.total_accesses_this_month, 2);
    }

    #[test]
    fn windows_are_rolling_not_calendar() {
        let windows = ReportWindows::anchored_at(local_now());
        let room = space(10, SpaceStatus::Available);
        let spans = [
            span(windows.now - Duration::days(8), Some(30)),
            span(windows.now - Duration::days(29), Some(10)),
            span(windows.now - Duration::days(31), Some(500)),
        ];

        let report = OccupancyReport::compute(&room, 0, &spans, &windows);
        assert_eq!(report.total_accesses_today, 0);
        assert_eq!(report.total_accesses_this_week, 0);
        assert_eq!(report.total_accesses_this_month, 2);
        assert_eq!(report.average_duration_in_minutes, 20.0);
        assert_eq!(report.occupancy_rate, 0.0);
    }

    #[test]
    fn average_ignores_open_visits_and_rounds() {
        let windows = ReportWindows::anchored_at(local_now());
        let room = space(10, SpaceStatus::Occupied);
        let spans = [
            span(windows.now - Duration::days(1), Some(10)),
            span(windows.now - Duration::days(2), Some(10)),
            span(windows.now - Duration::days(2), Some(11)),
            span(windows.now - Duration::hours(1), None),
        ];

        let report = OccupancyReport::compute(&room, 1, &spans, &windows);
        assert_eq!(report.average_duration_in_minutes, 10.33);
    }

    #[test]
    fn empty_history_reports_zeroes() {
        let windows = ReportWindows::anchored_at(local_now());
        let room = space(10, SpaceStatus::Available);
        let report = OccupancyReport::compute(&room, 0, &[], &windows);
        assert_eq!(report.average_duration_in_minutes, 0.0);
        assert_eq!(report.total_accesses_this_month, 0);
    }
}
