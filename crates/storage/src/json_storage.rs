//! JSON file storage implementation.
//!
//! Stores data as JSON files in a `.devmate` directory and keeps small
//! per-object meta markers (version + updated_at). One file per record;
//! relations are resolved by filtering on foreign-key fields at list time.

use std::path::{Path, PathBuf};
use devmate_core::{
    Activity, ActivityId, Phase, PhaseId, Roadmap, RoadmapId, Topic, Track, UserId,
    UserPreferences,
};
use super::{Result, Storage, StorageError};
use tokio::fs;
use tracing::warn;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage. This will create the subdirectories needed for data
    /// and meta markers under the given root.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        for kind in ["roadmaps", "phases", "activities", "preferences", "tracks", "topics"] {
            fs::create_dir_all(root.join(kind)).await?;
            fs::create_dir_all(root.join("meta").join(kind)).await?;
        }

        Ok(Self { root })
    }

    fn roadmap_path(&self, id: RoadmapId) -> PathBuf {
        self.root.join("roadmaps").join(format!("{}.json", id))
    }
    fn phase_path(&self, id: PhaseId) -> PathBuf {
        self.root.join("phases").join(format!("{}.json", id))
    }
    fn activity_path(&self, id: ActivityId) -> PathBuf {
        self.root.join("activities").join(format!("{}.json", id))
    }
    fn preferences_path(&self, user_id: &UserId) -> PathBuf {
        self.root.join("preferences").join(format!("{}.json", user_id))
    }

    fn meta_path(&self, kind: &str, id: &str) -> PathBuf {
        self.root.join("meta").join(kind).join(format!("{}.meta.json", id))
    }

    /// Read and increment per-object version, return new version.
    async fn bump_version(&self, kind: &str, id: &str) -> Result<u64> {
        let path = self.meta_path(kind, id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }

    async fn write_record<T: serde::Serialize>(
        &self,
        kind: &str,
        path: &Path,
        id: &str,
        value: &T,
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json.as_bytes()).await?;
        let _ver = self.bump_version(kind, id).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_roadmap(&mut self, roadmap: &Roadmap) -> Result<()> {
        let path = self.roadmap_path(roadmap.id);
        self.write_record("roadmaps", &path, &roadmap.id.to_string(), roadmap)
            .await
    }

    async fn load_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>> {
        read_json(&self.roadmap_path(id)).await
    }

    async fn load_roadmap_by_user(&self, user_id: &UserId) -> Result<Option<Roadmap>> {
        let all: Vec<Roadmap> = list_dir(&self.root.join("roadmaps")).await?;
        Ok(all.into_iter().find(|r| r.user_id == *user_id))
    }

    async fn delete_roadmap(&mut self, id: RoadmapId) -> Result<()> {
        remove_if_exists(&self.roadmap_path(id)).await
    }

    async fn save_phase(&mut self, phase: &Phase) -> Result<()> {
        let path = self.phase_path(phase.id);
        self.write_record("phases", &path, &phase.id.to_string(), phase).await
    }

    async fn load_phase(&self, id: PhaseId) -> Result<Option<Phase>> {
        read_json(&self.phase_path(id)).await
    }

    async fn list_phases(&self, roadmap_id: RoadmapId) -> Result<Vec<Phase>> {
        let mut phases: Vec<Phase> = list_dir(&self.root.join("phases")).await?;
        phases.retain(|p| p.roadmap_id == roadmap_id);
        phases.sort_by_key(|p| p.phase_index);
        Ok(phases)
    }

    async fn delete_phases(&mut self, roadmap_id: RoadmapId) -> Result<()> {
        let phases = self.list_phases(roadmap_id).await?;
        for phase in phases {
            let activities = self.list_activities(phase.id).await?;
            for activity in activities {
                remove_if_exists(&self.activity_path(activity.id)).await?;
            }
            remove_if_exists(&self.phase_path(phase.id)).await?;
        }
        Ok(())
    }

    async fn save_activity(&mut self, activity: &Activity) -> Result<()> {
        let path = self.activity_path(activity.id);
        self.write_record("activities", &path, &activity.id.to_string(), activity)
            .await
    }

    async fn load_activity(&self, id: ActivityId) -> Result<Option<Activity>> {
        read_json(&self.activity_path(id)).await
    }

    async fn list_activities(&self, phase_id: PhaseId) -> Result<Vec<Activity>> {
        let mut activities: Vec<Activity> = list_dir(&self.root.join("activities")).await?;
        activities.retain(|a| a.phase_id == phase_id);
        activities.sort_by_key(|a| a.activity_index);
        Ok(activities)
    }

    async fn apply_progress_update(
        &mut self,
        activity: &Activity,
        phase: &Phase,
        roadmap: &Roadmap,
    ) -> Result<()> {
        // Serialize everything up front so an encoding failure aborts
        // before any file is touched.
        let targets = [
            (self.activity_path(activity.id), serde_json::to_string_pretty(activity)?),
            (self.phase_path(phase.id), serde_json::to_string_pretty(phase)?),
            (self.roadmap_path(roadmap.id), serde_json::to_string_pretty(roadmap)?),
        ];

        // Capture prior contents for rollback.
        let mut originals: Vec<Option<String>> = Vec::with_capacity(targets.len());
        for (path, _) in &targets {
            match fs::read_to_string(path).await {
                Ok(s) => originals.push(Some(s)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => originals.push(None),
                Err(e) => return Err(e.into()),
            }
        }

        for (written, (path, json)) in targets.iter().enumerate() {
            if let Err(e) = fs::write(path, json.as_bytes()).await {
                // Undo the files already replaced so no partial update
                // remains observable.
                for (path, original) in targets.iter().map(|(p, _)| p).zip(&originals).take(written) {
                    let restore = match original {
                        Some(s) => fs::write(path, s.as_bytes()).await,
                        None => remove_if_exists(path).await.map_err(|e| match e {
                            StorageError::Io(io) => io,
                            other => std::io::Error::other(other.to_string()),
                        }),
                    };
                    if let Err(restore_err) = restore {
                        warn!(path = %path.display(), error = %restore_err, "rollback write failed");
                    }
                }
                return Err(e.into());
            }
        }

        self.bump_version("activities", &activity.id.to_string()).await?;
        self.bump_version("phases", &phase.id.to_string()).await?;
        self.bump_version("roadmaps", &roadmap.id.to_string()).await?;
        Ok(())
    }

    async fn save_preferences(&mut self, preferences: &UserPreferences) -> Result<()> {
        let path = self.preferences_path(&preferences.user_id);
        self.write_record("preferences", &path, preferences.user_id.as_str(), preferences)
            .await
    }

    async fn load_preferences(&self, user_id: &UserId) -> Result<Option<UserPreferences>> {
        read_json(&self.preferences_path(user_id)).await
    }

    async fn save_track(&mut self, track: &Track) -> Result<()> {
        let path = self.root.join("tracks").join(format!("{}.json", track.id));
        self.write_record("tracks", &path, &track.id.to_string(), track).await
    }

    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let mut tracks: Vec<Track> = list_dir(&self.root.join("tracks")).await?;
        tracks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tracks)
    }

    async fn save_topic(&mut self, topic: &Topic) -> Result<()> {
        let path = self.root.join("topics").join(format!("{}.json", topic.id));
        self.write_record("topics", &path, &topic.id.to_string(), topic).await
    }

    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let mut topics: Vec<Topic> = list_dir(&self.root.join("topics")).await?;
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(topics)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    fs::remove_file(path).await.or_else(|e| {
        if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use devmate_core::{ActivityKind, Difficulty};
    use tempfile::TempDir;

    fn sample_roadmap(user: &str) -> Roadmap {
        Roadmap {
            id: RoadmapId::new(),
            user_id: UserId::new(user),
            title: "Backend Foundations".to_string(),
            description: "Server-side fundamentals".to_string(),
            track_name: "Backend Development".to_string(),
            difficulty: Difficulty::Intermediate,
            total_days: 60,
            total_activities: 2,
            overall_progress: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_phase(roadmap_id: RoadmapId, index: u32) -> Phase {
        Phase {
            id: PhaseId::new(),
            roadmap_id,
            phase_index: index,
            name: format!("Phase {}", index),
            description: "A phase".to_string(),
            objectives: vec!["learn".to_string()],
            topics: vec!["SQL".to_string()],
            estimated_days: 30,
            progress: 0.0,
        }
    }

    fn sample_activity(phase_id: PhaseId, index: u32) -> Activity {
        Activity {
            id: ActivityId::new(),
            phase_id,
            activity_index: index,
            name: format!("Activity {}", index),
            description: "Do the thing".to_string(),
            kind: ActivityKind::Exercise,
            estimated_hours: 2.0,
            completed: false,
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_roadmap_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let roadmap = sample_roadmap("user-1");
        storage.save_roadmap(&roadmap).await.unwrap();

        let loaded = storage.load_roadmap(roadmap.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, roadmap.title);
        assert_eq!(loaded.user_id, roadmap.user_id);

        let by_user = storage
            .load_roadmap_by_user(&UserId::new("user-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_user.id, roadmap.id);

        assert!(storage
            .load_roadmap_by_user(&UserId::new("someone-else"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.load_roadmap(RoadmapId::new()).await.unwrap().is_none());
        assert!(storage.load_activity(ActivityId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_phases_ordered_by_index() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let roadmap = sample_roadmap("user-1");
        storage.save_roadmap(&roadmap).await.unwrap();

        // Insert out of order
        for index in [2u32, 0, 1] {
            storage.save_phase(&sample_phase(roadmap.id, index)).await.unwrap();
        }

        let phases = storage.list_phases(roadmap.id).await.unwrap();
        let indices: Vec<u32> = phases.iter().map(|p| p.phase_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_delete_phases_removes_activities() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let roadmap = sample_roadmap("user-1");
        storage.save_roadmap(&roadmap).await.unwrap();
        let phase = sample_phase(roadmap.id, 0);
        storage.save_phase(&phase).await.unwrap();
        let activity = sample_activity(phase.id, 0);
        storage.save_activity(&activity).await.unwrap();

        storage.delete_phases(roadmap.id).await.unwrap();

        assert!(storage.list_phases(roadmap.id).await.unwrap().is_empty());
        assert!(storage.load_activity(activity.id).await.unwrap().is_none());
        // The roadmap record itself is untouched
        assert!(storage.load_roadmap(roadmap.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_apply_progress_update_persists_all_three() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let mut roadmap = sample_roadmap("user-1");
        let mut phase = sample_phase(roadmap.id, 0);
        let mut activity = sample_activity(phase.id, 0);
        storage.save_roadmap(&roadmap).await.unwrap();
        storage.save_phase(&phase).await.unwrap();
        storage.save_activity(&activity).await.unwrap();

        activity.completed = true;
        activity.completed_at = Some(Utc::now());
        phase.progress = 100.0;
        roadmap.overall_progress = 50.0;

        storage
            .apply_progress_update(&activity, &phase, &roadmap)
            .await
            .unwrap();

        assert!(storage.load_activity(activity.id).await.unwrap().unwrap().completed);
        assert_eq!(storage.load_phase(phase.id).await.unwrap().unwrap().progress, 100.0);
        assert_eq!(
            storage.load_roadmap(roadmap.id).await.unwrap().unwrap().overall_progress,
            50.0
        );
    }

    #[tokio::test]
    async fn test_preferences_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let preferences = UserPreferences {
            user_id: UserId::new("user-1"),
            track_id: devmate_core::TrackId::new(),
            topic_ids: vec![devmate_core::TopicId::new()],
            confidence_scores: devmate_core::confidence_from_array(&[3; 10]),
            created_at: Utc::now(),
        };
        storage.save_preferences(&preferences).await.unwrap();

        let loaded = storage
            .load_preferences(&UserId::new("user-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.topic_ids, preferences.topic_ids);
        assert_eq!(loaded.confidence_scores.len(), 10);
    }
}
