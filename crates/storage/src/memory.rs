//! In-memory storage implementation.
//!
//! Backs tests and ephemeral runs. All-or-nothing semantics for the
//! progress update come for free: map inserts cannot half-fail.

use std::collections::HashMap;
use devmate_core::{
    Activity, ActivityId, Phase, PhaseId, Roadmap, RoadmapId, Topic, TopicId, Track, TrackId,
    UserId, UserPreferences,
};
use super::{Result, Storage};

/// HashMap-backed storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    roadmaps: HashMap<RoadmapId, Roadmap>,
    phases: HashMap<PhaseId, Phase>,
    activities: HashMap<ActivityId, Activity>,
    preferences: HashMap<UserId, UserPreferences>,
    tracks: HashMap<TrackId, Track>,
    topics: HashMap<TopicId, Topic>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a roadmap without going through the async trait. Test helper.
    pub fn insert_roadmap(&mut self, roadmap: Roadmap) {
        self.roadmaps.insert(roadmap.id, roadmap);
    }

    /// Insert a phase without going through the async trait. Test helper.
    pub fn insert_phase(&mut self, phase: Phase) {
        self.phases.insert(phase.id, phase);
    }

    /// Insert an activity without going through the async trait. Test helper.
    pub fn insert_activity(&mut self, activity: Activity) {
        self.activities.insert(activity.id, activity);
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_roadmap(&mut self, roadmap: &Roadmap) -> Result<()> {
        self.roadmaps.insert(roadmap.id, roadmap.clone());
        Ok(())
    }

    async fn load_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>> {
        Ok(self.roadmaps.get(&id).cloned())
    }

    async fn load_roadmap_by_user(&self, user_id: &UserId) -> Result<Option<Roadmap>> {
        Ok(self.roadmaps.values().find(|r| r.user_id == *user_id).cloned())
    }

    async fn delete_roadmap(&mut self, id: RoadmapId) -> Result<()> {
        self.roadmaps.remove(&id);
        Ok(())
    }

    async fn save_phase(&mut self, phase: &Phase) -> Result<()> {
        self.phases.insert(phase.id, phase.clone());
        Ok(())
    }

    async fn load_phase(&self, id: PhaseId) -> Result<Option<Phase>> {
        Ok(self.phases.get(&id).cloned())
    }

    async fn list_phases(&self, roadmap_id: RoadmapId) -> Result<Vec<Phase>> {
        let mut phases: Vec<Phase> = self
            .phases
            .values()
            .filter(|p| p.roadmap_id == roadmap_id)
            .cloned()
            .collect();
        phases.sort_by_key(|p| p.phase_index);
        Ok(phases)
    }

    async fn delete_phases(&mut self, roadmap_id: RoadmapId) -> Result<()> {
        let phase_ids: Vec<PhaseId> = self
            .phases
            .values()
            .filter(|p| p.roadmap_id == roadmap_id)
            .map(|p| p.id)
            .collect();
        self.activities.retain(|_, a| !phase_ids.contains(&a.phase_id));
        for id in phase_ids {
            self.phases.remove(&id);
        }
        Ok(())
    }

    async fn save_activity(&mut self, activity: &Activity) -> Result<()> {
        self.activities.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn load_activity(&self, id: ActivityId) -> Result<Option<Activity>> {
        Ok(self.activities.get(&id).cloned())
    }

    async fn list_activities(&self, phase_id: PhaseId) -> Result<Vec<Activity>> {
        let mut activities: Vec<Activity> = self
            .activities
            .values()
            .filter(|a| a.phase_id == phase_id)
            .cloned()
            .collect();
        activities.sort_by_key(|a| a.activity_index);
        Ok(activities)
    }

    async fn apply_progress_update(
        &mut self,
        activity: &Activity,
        phase: &Phase,
        roadmap: &Roadmap,
    ) -> Result<()> {
        self.activities.insert(activity.id, activity.clone());
        self.phases.insert(phase.id, phase.clone());
        self.roadmaps.insert(roadmap.id, roadmap.clone());
        Ok(())
    }

    async fn save_preferences(&mut self, preferences: &UserPreferences) -> Result<()> {
        self.preferences
            .insert(preferences.user_id.clone(), preferences.clone());
        Ok(())
    }

    async fn load_preferences(&self, user_id: &UserId) -> Result<Option<UserPreferences>> {
        Ok(self.preferences.get(user_id).cloned())
    }

    async fn save_track(&mut self, track: &Track) -> Result<()> {
        self.tracks.insert(track.id, track.clone());
        Ok(())
    }

    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let mut tracks: Vec<Track> = self.tracks.values().cloned().collect();
        tracks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tracks)
    }

    async fn save_topic(&mut self, topic: &Topic) -> Result<()> {
        self.topics.insert(topic.id, topic.clone());
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let mut topics: Vec<Topic> = self.topics.values().cloned().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(topics)
    }
}
