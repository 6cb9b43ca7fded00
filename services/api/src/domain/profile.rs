//! Role-aware profile patching.
//!
//! A patch is a JSON object. Restricted keys are dropped, the caller's scope is
//! resolved once, and only the keys in that scope's allowed set are applied.
//! Everything else is ignored.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use mentpat_domain::profile::{CompanyStint, MentorDetails, MentorshipCategory};
use mentpat_domain::user::{MentorType, Role};

use crate::domain::types::{User, normalize_identifier};
use crate::error::ApiServiceError;

/// Keys a client can never set through a profile patch.
pub const RESTRICTED_FIELDS: &[&str] = &["role", "email", "password", "_id", "id", "refreshToken"];

pub const GENERIC_FIELDS: &[&str] = &["fullName", "username", "college"];
pub const MENTEE_FIELDS: &[&str] = &["domainOfInterest", "learningGoals"];
pub const MENTOR_FIELDS: &[&str] = &["expertiseDomains", "mentorshipCategories", "mentorType"];
pub const PROFESSOR_FIELDS: &[&str] = &[
    "yearsOfExperience",
    "domainExpertise",
    "researchPublications",
    "designation",
];
pub const ALUMNI_FIELDS: &[&str] = &[
    "batchPassout",
    "domainExpertise",
    "companiesWorkedAt",
    "currentCompany",
    "currentPosition",
];
pub const PEER_GROUP_FIELDS: &[&str] = &["currentYear", "projects", "achievements"];
pub const ADMIN_FIELDS: &[&str] = &["adminDetails"];

/// Which profile fields a caller may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileScope {
    /// `mentor_type` is the effective type: the patched one if present, else stored.
    Mentor { mentor_type: Option<MentorType> },
    Mentee,
    Admin,
}

impl ProfileScope {
    pub fn resolve(role: Role, mentor_type: Option<MentorType>) -> Self {
        match role {
            Role::Mentor => Self::Mentor { mentor_type },
            Role::Mentee => Self::Mentee,
            Role::Admin => Self::Admin,
        }
    }

    pub fn allowed_fields(&self) -> Vec<&'static str> {
        let mut fields = GENERIC_FIELDS.to_vec();
        match self {
            Self::Mentee => fields.extend_from_slice(MENTEE_FIELDS),
            Self::Admin => fields.extend_from_slice(ADMIN_FIELDS),
            Self::Mentor { mentor_type } => {
                fields.extend_from_slice(MENTOR_FIELDS);
                fields.extend_from_slice(match mentor_type {
                    Some(MentorType::Professor) => PROFESSOR_FIELDS,
                    Some(MentorType::Alumni) => ALUMNI_FIELDS,
                    Some(MentorType::PeerGroup) => PEER_GROUP_FIELDS,
                    None => &[],
                });
            }
        }
        fields
    }
}

#[derive(Deserialize)]
struct AdminPatch {
    permissions: Option<Vec<String>>,
}

/// Drop keys a client must never set.
pub fn strip_restricted(patch: &mut Map<String, Value>) {
    for field in RESTRICTED_FIELDS {
        patch.remove(*field);
    }
}

/// Read `field` from the patch. Absent and `null` both mean "leave unchanged".
fn read<T: DeserializeOwned>(
    patch: &Map<String, Value>,
    field: &str,
) -> Result<Option<T>, ApiServiceError> {
    match patch.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| ApiServiceError::InvalidField(field.to_owned())),
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ApiServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiServiceError::InvalidField(field.to_owned()));
    }
    Ok(trimmed.to_owned())
}

/// Resolve the caller's scope for this patch.
pub fn scope_for(user: &User, patch: &Map<String, Value>) -> Result<ProfileScope, ApiServiceError> {
    let stored = user.mentor_details.as_ref().and_then(|d| d.mentor_type);
    let patched = match user.role {
        Role::Mentor => read::<MentorType>(patch, "mentorType")?,
        _ => None,
    };
    Ok(ProfileScope::resolve(user.role, patched.or(stored)))
}

/// Apply an already-stripped patch to `user` within `scope`.
///
/// Validates every allowed field before touching `user`, so a bad value leaves
/// it unchanged.
pub fn apply_patch(
    user: &mut User,
    scope: ProfileScope,
    patch: &Map<String, Value>,
) -> Result<(), ApiServiceError> {
    let mut next = user.clone();
    for field in scope.allowed_fields() {
        apply_field(&mut next, scope, field, patch)?;
    }
    *user = next;
    Ok(())
}

fn mentor(user: &mut User) -> &mut MentorDetails {
    user.mentor_details.get_or_insert_with(MentorDetails::default)
}

fn apply_field(
    user: &mut User,
    scope: ProfileScope,
    field: &'static str,
    patch: &Map<String, Value>,
) -> Result<(), ApiServiceError> {
    let mentor_type = match scope {
        ProfileScope::Mentor { mentor_type } => mentor_type,
        _ => None,
    };
    match field {
        "fullName" => {
            if let Some(v) = read::<String>(patch, field)? {
                user.full_name = non_blank(field, v)?;
            }
        }
        "username" => {
            if let Some(v) = read::<String>(patch, field)? {
                user.username = normalize_identifier(&non_blank(field, v)?);
            }
        }
        "college" => {
            if let Some(v) = read::<String>(patch, field)? {
                user.college = Some(non_blank(field, v)?);
            }
        }
        "domainOfInterest" => {
            if let Some(v) = read(patch, field)? {
                user.domain_of_interest = v;
            }
        }
        "learningGoals" => {
            if let Some(v) = read(patch, field)? {
                user.mentee_details.get_or_insert_with(Default::default).learning_goals = v;
            }
        }
        "expertiseDomains" => {
            if let Some(v) = read(patch, field)? {
                user.expertise_domains = v;
            }
        }
        "mentorshipCategories" => {
            if let Some(v) = read::<Vec<MentorshipCategory>>(patch, field)? {
                user.mentorship_categories = v;
            }
        }
        "mentorType" => {
            if let Some(v) = read::<MentorType>(patch, field)? {
                mentor(user).mentor_type = Some(v);
            }
        }
        "yearsOfExperience" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).professor_details.years_of_experience = Some(v);
            }
        }
        "researchPublications" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).professor_details.research_publications = v;
            }
        }
        "designation" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).professor_details.designation = Some(v);
            }
        }
        "domainExpertise" => {
            if let Some(v) = read::<Vec<String>>(patch, field)? {
                match mentor_type {
                    Some(MentorType::Professor) => {
                        mentor(user).professor_details.domain_expertise = v
                    }
                    Some(MentorType::Alumni) => mentor(user).alumni_details.domain_expertise = v,
                    _ => {}
                }
            }
        }
        "batchPassout" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).alumni_details.batch_passout = Some(v);
            }
        }
        "companiesWorkedAt" => {
            if let Some(v) = read::<Vec<CompanyStint>>(patch, field)? {
                mentor(user).alumni_details.companies_worked_at = v;
            }
        }
        "currentCompany" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).alumni_details.current_company = Some(v);
            }
        }
        "currentPosition" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).alumni_details.current_position = Some(v);
            }
        }
        "currentYear" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).peer_group_details.current_year = Some(v);
            }
        }
        "projects" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).peer_group_details.projects = v;
            }
        }
        "achievements" => {
            if let Some(v) = read(patch, field)? {
                mentor(user).peer_group_details.achievements = v;
            }
        }
        "adminDetails" => {
            if let Some(AdminPatch {
                permissions: Some(permissions),
            }) = read::<AdminPatch>(patch, field)?
            {
                user.admin_details.get_or_insert_with(Default::default).permissions = permissions;
            }
        }
        _ => {}
    }
    Ok(())
}
