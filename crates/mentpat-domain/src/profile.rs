//! Role-specific profile blocks nested inside a user record.
//!
//! All blocks serialize with camelCase keys; they are stored as JSON documents
//! next to the flat user columns.

use serde::{Deserialize, Serialize};

use crate::id::{SessionId, UserId};
use crate::user::MentorType;

/// Mentoring areas a mentor can advertise. Serialized with display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentorshipCategory {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "CAT Guidance")]
    CatGuidance,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "Blockchain")]
    Blockchain,
    #[serde(rename = "Product Management")]
    ProductManagement,
    #[serde(rename = "Entrepreneurship")]
    Entrepreneurship,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentorDetails {
    /// Unset until the mentor picks one through a profile update.
    pub mentor_type: Option<MentorType>,
    pub ratings: Vec<MentorRating>,
    pub professor_details: ProfessorDetails,
    pub alumni_details: AlumniDetails,
    pub peer_group_details: PeerGroupDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRating {
    pub mentee_id: UserId,
    pub rating: f32,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessorDetails {
    pub years_of_experience: Option<u32>,
    pub domain_expertise: Vec<String>,
    pub research_publications: Vec<String>,
    pub designation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlumniDetails {
    pub batch_passout: Option<i32>,
    pub domain_expertise: Vec<String>,
    pub companies_worked_at: Vec<CompanyStint>,
    pub current_company: Option<String>,
    pub current_position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyStint {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeerGroupDetails {
    pub current_year: Option<u32>,
    pub projects: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenteeDetails {
    pub booked_sessions: Vec<SessionId>,
    pub learning_goals: Vec<String>,
    pub notes: Vec<SessionNote>,
    pub feedback_given: Vec<MentorFeedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNote {
    pub session_id: SessionId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorFeedback {
    pub mentor_id: UserId,
    pub rating: f32,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDetails {
    pub permissions: Vec<String>,
}
