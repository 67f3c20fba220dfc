//! Shared test fixtures for this crate.

use chrono::{DateTime, Utc};
use devmate_core::{Clock, Time};

/// Clock pinned to a single instant.
pub struct FixedClock(Time);

impl FixedClock {
    /// Pin to an RFC 3339 timestamp.
    pub fn at(rfc3339: &str) -> Self {
        Self(
            DateTime::parse_from_rfc3339(rfc3339)
                .expect("fixture timestamp")
                .with_timezone(&Utc),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Time {
        self.0
    }
}

/// Roadmap tree builders.
pub mod fixture {
    use chrono::Utc;
    use devmate_core::{
        Activity, ActivityId, ActivityKind, Difficulty, Phase, PhaseId, Roadmap, RoadmapId,
        UserId,
    };
    use devmate_storage::MemoryStorage;

    /// An in-memory roadmap tree with stable ids for test addressing.
    pub struct Tree {
        /// The roadmap record
        pub roadmap: Roadmap,
        /// Phases in `phase_index` order
        pub phases: Vec<Phase>,
        /// Activities grouped per phase, in `activity_index` order
        pub activities: Vec<Vec<Activity>>,
        /// Shorthand for `roadmap.id`
        pub roadmap_id: RoadmapId,
    }

    impl Tree {
        /// Id of the phase at `index`.
        pub fn phase(&self, index: usize) -> PhaseId {
            self.phases[index].id
        }

        /// Id of an activity by phase and position.
        pub fn activity(&self, phase: usize, index: usize) -> ActivityId {
            self.activities[phase][index].id
        }

        /// Clone the per-phase activity sets.
        pub fn activities_by_phase(&self) -> Vec<Vec<Activity>> {
            self.activities.clone()
        }
    }

    /// Build an uncompleted roadmap tree with the given phase sizes.
    pub fn roadmap_tree(user_id: &UserId, phase_sizes: &[usize]) -> Tree {
        let now = Utc::now();
        let total: usize = phase_sizes.iter().sum();

        let roadmap = Roadmap {
            id: RoadmapId::new(),
            user_id: user_id.clone(),
            title: "Test Roadmap".to_string(),
            description: "Fixture".to_string(),
            track_name: "Backend Development".to_string(),
            difficulty: Difficulty::Intermediate,
            total_days: 30 * phase_sizes.len() as u32,
            total_activities: total as u32,
            overall_progress: 0.0,
            created_at: now,
            updated_at: now,
        };

        let kinds = [
            ActivityKind::Reading,
            ActivityKind::Exercise,
            ActivityKind::Project,
            ActivityKind::Quiz,
        ];

        let mut phases = Vec::new();
        let mut activities = Vec::new();
        for (phase_index, size) in phase_sizes.iter().enumerate() {
            let phase = Phase {
                id: PhaseId::new(),
                roadmap_id: roadmap.id,
                phase_index: phase_index as u32,
                name: format!("Phase {}", phase_index),
                description: "Fixture phase".to_string(),
                objectives: Vec::new(),
                topics: Vec::new(),
                estimated_days: 30,
                progress: 0.0,
            };
            let set: Vec<Activity> = (0..*size)
                .map(|activity_index| Activity {
                    id: ActivityId::new(),
                    phase_id: phase.id,
                    activity_index: activity_index as u32,
                    name: format!("Activity {}.{}", phase_index, activity_index),
                    description: "Fixture activity".to_string(),
                    kind: kinds[activity_index % kinds.len()],
                    estimated_hours: 2.0,
                    completed: false,
                    completed_at: None,
                })
                .collect();
            phases.push(phase);
            activities.push(set);
        }

        Tree { roadmap_id: roadmap.id, roadmap, phases, activities }
    }

    /// Load a tree into in-memory storage.
    pub fn seed(storage: &mut MemoryStorage, tree: &Tree) {
        storage.insert_roadmap(tree.roadmap.clone());
        for phase in &tree.phases {
            storage.insert_phase(phase.clone());
        }
        for set in &tree.activities {
            for activity in set {
                storage.insert_activity(activity.clone());
            }
        }
    }
}
