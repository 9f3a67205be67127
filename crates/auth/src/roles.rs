use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::navigation::Route;

/// Capability tier of a user.
///
/// Closed set: the identity store may only hand out these four values. Raw
/// claim strings outside the set are folded into [`Role::Student`] by
/// [`Role::from_claim`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Instructor,
    Mentor,
    Admin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Instructor, Role::Mentor, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Instructor => "INSTRUCTOR",
            Role::Mentor => "MENTOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Lenient parse used for session claims.
    ///
    /// Unrecognized values fall through to `Student` so a role added upstream
    /// never hard-fails a request.
    pub fn from_claim(raw: &str) -> Role {
        match raw.parse() {
            Ok(role) => role,
            Err(UnknownRole(raw)) => {
                tracing::warn!(role = %raw, "unrecognized role in session; treating as student");
                Role::Student
            }
        }
    }

    /// Root of the page tree this role owns.
    pub fn dashboard_root(&self) -> Route {
        match self {
            Role::Student => Route::StudentCourses,
            Role::Instructor => Route::InstructorCourses,
            Role::Mentor => Route::MentorDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("instructor".parse::<Role>().unwrap(), Role::Instructor);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("MENTOR".parse::<Role>().unwrap(), Role::Mentor);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!(
            "TEACHING_ASSISTANT".parse::<Role>(),
            Err(UnknownRole("TEACHING_ASSISTANT".to_string()))
        );
    }

    #[test]
    fn claim_parse_falls_through_to_student() {
        assert_eq!(Role::from_claim("TEACHING_ASSISTANT"), Role::Student);
        assert_eq!(Role::from_claim("INSTRUCTOR"), Role::Instructor);
    }

    #[test]
    fn every_role_owns_a_distinct_dashboard() {
        let roots: std::collections::HashSet<_> =
            Role::ALL.iter().map(|r| r.dashboard_root()).collect();
        assert_eq!(roots.len(), Role::ALL.len());
    }

    #[test]
    fn serde_uses_screaming_case() {
        let json = serde_json::to_string(&Role::Instructor).unwrap();
        assert_eq!(json, "\"INSTRUCTOR\"");
    }
}
