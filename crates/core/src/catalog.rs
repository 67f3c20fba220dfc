//! Built-in track and topic catalog.
//!
//! Seed data for the onboarding questionnaire. Tracks and topics are
//! persisted records (so user preferences can reference them by id); the
//! seed tables here are the canonical source they are created from.

use serde::{Deserialize, Serialize};
use crate::id::{TopicId, TrackId};

/// A learning track a user can choose during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier
    pub id: TrackId,

    /// Track name (unique)
    pub name: String,

    /// Description
    pub description: String,
}

/// A topic a user can declare interest in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier
    pub id: TopicId,

    /// Topic name (unique)
    pub name: String,

    /// Description
    pub description: String,

    /// Track this topic belongs to. None for general topics offered to all.
    pub track: Option<String>,
}

/// Seed entry for a track.
#[derive(Debug, Clone, Copy)]
pub struct TrackSeed {
    /// Track name
    pub name: &'static str,
    /// Description
    pub description: &'static str,
}

/// Seed entry for a topic.
#[derive(Debug, Clone, Copy)]
pub struct TopicSeed {
    /// Topic name
    pub name: &'static str,
    /// Description
    pub description: &'static str,
    /// Owning track name, or None for general topics
    pub track: Option<&'static str>,
}

/// The built-in tracks.
pub fn builtin_tracks() -> &'static [TrackSeed] {
    &[
        TrackSeed { name: "Frontend Development", description: "Learn modern frontend technologies like React, Vue, and Angular" },
        TrackSeed { name: "Backend Development", description: "Master server-side technologies and databases" },
        TrackSeed { name: "Full Stack Development", description: "Combine frontend and backend skills" },
        TrackSeed { name: "Data Science", description: "Analyze data and build machine learning models" },
        TrackSeed { name: "Mobile Development", description: "Build native and cross-platform mobile applications" },
        TrackSeed { name: "DevOps", description: "Infrastructure, deployment, and system administration" },
    ]
}

/// The built-in topics.
pub fn builtin_topics() -> &'static [TopicSeed] {
    &[
        // Frontend Development
        TopicSeed { name: "HTML & CSS", description: "Markup and styling fundamentals", track: Some("Frontend Development") },
        TopicSeed { name: "JavaScript", description: "Modern JavaScript and ES6+ features", track: Some("Frontend Development") },
        TopicSeed { name: "React", description: "Build interactive user interfaces with React", track: Some("Frontend Development") },
        TopicSeed { name: "Vue.js", description: "Progressive JavaScript framework", track: Some("Frontend Development") },
        TopicSeed { name: "TypeScript", description: "Typed superset of JavaScript", track: Some("Frontend Development") },
        TopicSeed { name: "Responsive Design", description: "Mobile-first and adaptive layouts", track: Some("Frontend Development") },
        TopicSeed { name: "Web Performance", description: "Optimization and performance tuning", track: Some("Frontend Development") },
        // Backend Development
        TopicSeed { name: "Node.js", description: "Server-side JavaScript development", track: Some("Backend Development") },
        TopicSeed { name: "Python", description: "Backend development with Python", track: Some("Backend Development") },
        TopicSeed { name: "SQL", description: "Database query language and design", track: Some("Backend Development") },
        TopicSeed { name: "NoSQL", description: "MongoDB, Redis, and document databases", track: Some("Backend Development") },
        TopicSeed { name: "REST APIs", description: "RESTful web service design", track: Some("Backend Development") },
        TopicSeed { name: "GraphQL", description: "Query language for APIs", track: Some("Backend Development") },
        TopicSeed { name: "Microservices", description: "Distributed system architecture", track: Some("Backend Development") },
        // Full Stack Development
        TopicSeed { name: "Full Stack JavaScript", description: "End-to-end JavaScript development", track: Some("Full Stack Development") },
        TopicSeed { name: "API Integration", description: "Connecting frontend and backend", track: Some("Full Stack Development") },
        TopicSeed { name: "Database Design", description: "Designing efficient database schemas", track: Some("Full Stack Development") },
        // Data Science
        TopicSeed { name: "Machine Learning", description: "AI and ML algorithms", track: Some("Data Science") },
        TopicSeed { name: "Python for Data Science", description: "NumPy, Pandas, Scikit-learn", track: Some("Data Science") },
        TopicSeed { name: "Data Visualization", description: "Matplotlib, Plotly, D3.js", track: Some("Data Science") },
        TopicSeed { name: "Statistics", description: "Statistical analysis and modeling", track: Some("Data Science") },
        TopicSeed { name: "Deep Learning", description: "Neural networks and TensorFlow", track: Some("Data Science") },
        // Mobile Development
        TopicSeed { name: "React Native", description: "Cross-platform mobile development", track: Some("Mobile Development") },
        TopicSeed { name: "Flutter", description: "Google's UI toolkit for mobile", track: Some("Mobile Development") },
        TopicSeed { name: "iOS Development", description: "Swift and native iOS apps", track: Some("Mobile Development") },
        TopicSeed { name: "Android Development", description: "Kotlin and native Android apps", track: Some("Mobile Development") },
        // DevOps
        TopicSeed { name: "Docker", description: "Containerization and deployment", track: Some("DevOps") },
        TopicSeed { name: "Kubernetes", description: "Container orchestration", track: Some("DevOps") },
        TopicSeed { name: "CI/CD", description: "Continuous integration and deployment", track: Some("DevOps") },
        TopicSeed { name: "AWS", description: "Amazon Web Services cloud platform", track: Some("DevOps") },
        TopicSeed { name: "Monitoring", description: "Application and infrastructure monitoring", track: Some("DevOps") },
        // General topics available to all tracks
        TopicSeed { name: "Git & Version Control", description: "Source code management", track: None },
        TopicSeed { name: "Algorithms & Data Structures", description: "Computer science fundamentals", track: None },
        TopicSeed { name: "System Design", description: "Scalable architecture principles", track: None },
        TopicSeed { name: "Security", description: "Application and web security", track: None },
        TopicSeed { name: "Testing", description: "Unit, integration, and end-to-end testing", track: None },
    ]
}
