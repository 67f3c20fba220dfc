//! Dashboard analytics.
//!
//! Pure calculations over a loaded roadmap tree: completion statistics,
//! learning streak, current phase, recent and upcoming activities, and a
//! pace-based completion estimate. Percentages are rounded here because
//! these values exist for display; the aggregator itself never rounds.

use chrono::{Duration, NaiveDate};
use devmate_core::{Activity, ActivityKind, Difficulty, Phase, Roadmap, Time};
use serde::Serialize;

/// Assumed learning pace for the completion estimate, in hours per day.
const HOURS_PER_DAY: f32 = 2.0;

/// How many recent completions to surface.
const RECENT_LIMIT: usize = 5;

/// Summary statistics for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    /// Roadmap title
    pub roadmap_title: String,

    /// Track the roadmap was generated for
    pub track_name: String,

    /// Difficulty label
    pub difficulty: Difficulty,

    /// Overall progress, rounded for display
    pub overall_progress: i32,

    /// Completed / total ratio as a rounded percentage
    pub completion_rate: i32,

    /// Number of completed activities
    pub completed_activities: usize,

    /// Total number of activities
    pub total_activities: usize,

    /// Consecutive days (ending today or yesterday) with a completion
    pub current_streak: u32,

    /// First phase below 100 percent, or the last phase when all are done
    pub current_phase: Option<CurrentPhase>,

    /// Most recent completions, newest first
    pub recent_activities: Vec<RecentActivity>,

    /// Next incomplete activity in phase/activity order
    pub upcoming_activity: Option<UpcomingActivity>,

    /// Days left at the assumed pace
    pub estimated_days_remaining: i64,

    /// Projected completion date
    pub estimated_completion: Time,
}

/// The phase the user is currently working through.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPhase {
    /// Zero-based phase index
    pub index: u32,

    /// Phase name
    pub name: String,

    /// Phase progress (0-100)
    pub progress: f32,
}

/// A recently completed activity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    /// Activity name
    pub name: String,

    /// Kind of work
    pub kind: ActivityKind,

    /// When it was completed
    pub completed_at: Time,

    /// Name of the owning phase
    pub phase_name: String,
}

/// The next activity waiting to be done.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingActivity {
    /// Activity name
    pub name: String,

    /// Kind of work
    pub kind: ActivityKind,

    /// Estimated effort in hours
    pub estimated_hours: f32,

    /// Name of the owning phase
    pub phase_name: String,
}

/// Compute dashboard analytics for a loaded roadmap tree.
///
/// `phases` must be ordered by `phase_index` with each activity set ordered
/// by `activity_index`.
pub fn dashboard(
    roadmap: &Roadmap,
    phases: &[(Phase, Vec<Activity>)],
    now: Time,
) -> DashboardAnalytics {
    let total_activities: usize = phases.iter().map(|(_, set)| set.len()).sum();
    let completed_activities: usize = phases
        .iter()
        .map(|(_, set)| set.iter().filter(|a| a.completed).count())
        .sum();

    let completion_rate = if total_activities > 0 {
        (completed_activities as f32 / total_activities as f32 * 100.0).round() as i32
    } else {
        0
    };

    let current_phase = phases
        .iter()
        .find(|(phase, _)| phase.progress < 100.0)
        .or_else(|| phases.last())
        .map(|(phase, _)| CurrentPhase {
            index: phase.phase_index,
            name: phase.name.clone(),
            progress: phase.progress,
        });

    let mut completions: Vec<(&Phase, &Activity, Time)> = phases
        .iter()
        .flat_map(|(phase, set)| {
            set.iter()
                .filter_map(move |a| a.completed_at.map(|at| (phase, a, at)))
        })
        .collect();
    completions.sort_by(|a, b| b.2.cmp(&a.2));

    let recent_activities = completions
        .iter()
        .take(RECENT_LIMIT)
        .map(|(phase, activity, at)| RecentActivity {
            name: activity.name.clone(),
            kind: activity.kind,
            completed_at: *at,
            phase_name: phase.name.clone(),
        })
        .collect();

    let upcoming_activity = phases.iter().find_map(|(phase, set)| {
        set.iter().find(|a| !a.completed).map(|a| UpcomingActivity {
            name: a.name.clone(),
            kind: a.kind,
            estimated_hours: a.estimated_hours,
            phase_name: phase.name.clone(),
        })
    });

    let remaining_hours: f32 = phases
        .iter()
        .flat_map(|(_, set)| set.iter())
        .filter(|a| !a.completed)
        .map(|a| a.estimated_hours)
        .sum();
    let estimated_days_remaining = (remaining_hours / HOURS_PER_DAY).ceil() as i64;
    let estimated_completion = now + Duration::days(estimated_days_remaining);

    let completion_dates: Vec<NaiveDate> =
        completions.iter().map(|(_, _, at)| at.date_naive()).collect();
    let current_streak = streak(&completion_dates, now.date_naive());

    DashboardAnalytics {
        roadmap_title: roadmap.title.clone(),
        track_name: roadmap.track_name.clone(),
        difficulty: roadmap.difficulty,
        overall_progress: roadmap.overall_progress.round() as i32,
        completion_rate,
        completed_activities,
        total_activities,
        current_streak,
        current_phase,
        recent_activities,
        upcoming_activity,
        estimated_days_remaining,
        estimated_completion,
    }
}

/// Count consecutive days with at least one completion, walking back from
/// today (or yesterday, when nothing was completed today).
///
/// `dates` must be sorted newest first; duplicates are tolerated.
fn streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut distinct: Vec<NaiveDate> = dates.to_vec();
    distinct.dedup();

    let Some(&most_recent) = distinct.first() else {
        return 0;
    };
    let Some(yesterday) = today.pred_opt() else {
        return 0;
    };
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut count = 0u32;
    let mut cursor = most_recent;
    for &date in &distinct {
        if date != cursor {
            break;
        }
        count += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;
    use chrono::{TimeZone, Utc};
    use devmate_core::UserId;

    fn at(rfc3339: &str) -> Time {
        chrono::DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn tree_with_completions() -> (Roadmap, Vec<(Phase, Vec<Activity>)>) {
        let tree = fixture::roadmap_tree(&UserId::new("u"), &[2, 2]);
        let mut roadmap = tree.roadmap.clone();
        roadmap.overall_progress = 50.0;

        let mut phases: Vec<(Phase, Vec<Activity>)> = tree
            .phases
            .iter()
            .cloned()
            .zip(tree.activities_by_phase())
            .collect();

        // Two completions on consecutive days in phase 0.
        phases[0].0.progress = 100.0;
        phases[0].1[0].completed = true;
        phases[0].1[0].completed_at = Some(at("2026-08-05T09:00:00Z"));
        phases[0].1[1].completed = true;
        phases[0].1[1].completed_at = Some(at("2026-08-06T10:00:00Z"));

        (roadmap, phases)
    }

    #[test]
    fn test_dashboard_counts_and_rates() {
        let (roadmap, phases) = tree_with_completions();
        let analytics = dashboard(&roadmap, &phases, at("2026-08-06T12:00:00Z"));

        assert_eq!(analytics.total_activities, 4);
        assert_eq!(analytics.completed_activities, 2);
        assert_eq!(analytics.completion_rate, 50);
        assert_eq!(analytics.overall_progress, 50);
    }

    #[test]
    fn test_current_phase_is_first_incomplete() {
        let (roadmap, phases) = tree_with_completions();
        let analytics = dashboard(&roadmap, &phases, at("2026-08-06T12:00:00Z"));

        let current = analytics.current_phase.unwrap();
        assert_eq!(current.index, 1);
        assert_eq!(current.progress, 0.0);
    }

    #[test]
    fn test_current_phase_falls_back_to_last_when_all_done() {
        let (roadmap, mut phases) = tree_with_completions();
        for (phase, set) in &mut phases {
            phase.progress = 100.0;
            for activity in set {
                activity.completed = true;
                activity.completed_at = Some(at("2026-08-06T08:00:00Z"));
            }
        }
        let analytics = dashboard(&roadmap, &phases, at("2026-08-06T12:00:00Z"));
        assert_eq!(analytics.current_phase.unwrap().index, 1);
    }

    #[test]
    fn test_recent_and_upcoming() {
        let (roadmap, phases) = tree_with_completions();
        let analytics = dashboard(&roadmap, &phases, at("2026-08-06T12:00:00Z"));

        // Newest completion first
        assert_eq!(analytics.recent_activities.len(), 2);
        assert_eq!(
            analytics.recent_activities[0].completed_at,
            at("2026-08-06T10:00:00Z")
        );

        // Next incomplete is the first activity of phase 1
        let upcoming = analytics.upcoming_activity.unwrap();
        assert_eq!(upcoming.phase_name, phases[1].0.name);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let today = at("2026-08-06T12:00:00Z").date_naive();
        let dates = vec![
            at("2026-08-06T10:00:00Z").date_naive(),
            at("2026-08-05T09:00:00Z").date_naive(),
            at("2026-08-04T09:00:00Z").date_naive(),
            // Gap
            at("2026-08-01T09:00:00Z").date_naive(),
        ];
        assert_eq!(streak(&dates, today), 3);
    }

    #[test]
    fn test_streak_allows_starting_yesterday() {
        let today = at("2026-08-06T12:00:00Z").date_naive();
        let dates = vec![
            at("2026-08-05T09:00:00Z").date_naive(),
            at("2026-08-04T09:00:00Z").date_naive(),
        ];
        assert_eq!(streak(&dates, today), 2);
    }

    #[test]
    fn test_streak_broken_by_older_completions() {
        let today = at("2026-08-06T12:00:00Z").date_naive();
        let dates = vec![at("2026-08-03T09:00:00Z").date_naive()];
        assert_eq!(streak(&dates, today), 0);
        assert_eq!(streak(&[], today), 0);
    }

    #[test]
    fn test_streak_same_day_counts_once() {
        let today = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap().date_naive();
        let dates = vec![today, today, today];
        assert_eq!(streak(&dates, today), 1);
    }

    #[test]
    fn test_estimated_completion_uses_pace() {
        let (roadmap, phases) = tree_with_completions();
        let now = at("2026-08-06T12:00:00Z");
        let analytics = dashboard(&roadmap, &phases, now);

        // Two incomplete activities at 2.0h each -> 4h -> 2 days at 2h/day
        assert_eq!(analytics.estimated_days_remaining, 2);
        assert_eq!(analytics.estimated_completion, now + Duration::days(2));
    }

    #[test]
    fn test_empty_roadmap_is_all_zeroes() {
        let tree = fixture::roadmap_tree(&UserId::new("u"), &[]);
        let analytics = dashboard(&tree.roadmap, &[], at("2026-08-06T12:00:00Z"));

        assert_eq!(analytics.total_activities, 0);
        assert_eq!(analytics.completion_rate, 0);
        assert_eq!(analytics.current_streak, 0);
        assert!(analytics.current_phase.is_none());
        assert!(analytics.upcoming_activity.is_none());
        assert_eq!(analytics.estimated_days_remaining, 0);
    }
}
