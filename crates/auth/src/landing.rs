//! Default landing route per session.

use crate::navigation::Route;
use crate::roles::Role;
use crate::session::Session;

/// Decide where a request for the site root should land.
///
/// First match wins:
/// - no session, or a session without a role → login
/// - instructor → instructor course list
/// - anything else → student course list
///
/// Mentors and admins land on the student course list here; the student
/// tree's guard then forwards them to their own dashboard.
pub fn resolve_landing(session: Option<&Session>) -> Route {
    match session.and_then(|s| s.role) {
        None => Route::Login,
        Some(Role::Instructor) => Route::InstructorCourses,
        Some(_) => Route::StudentCourses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::SessionClaims;
    use learnhub_core::UserId;

    fn session(role: Option<Role>) -> Session {
        Session::new(UserId::new(), role)
    }

    #[test]
    fn no_session_lands_on_login() {
        assert_eq!(resolve_landing(None), Route::Login);
    }

    #[test]
    fn session_without_role_lands_on_login() {
        assert_eq!(resolve_landing(Some(&session(None))), Route::Login);
    }

    #[test]
    fn instructor_lands_on_instructor_courses() {
        assert_eq!(
            resolve_landing(Some(&session(Some(Role::Instructor)))),
            Route::InstructorCourses
        );
    }

    #[test]
    fn everyone_else_lands_on_student_courses() {
        for role in [Role::Student, Role::Mentor, Role::Admin] {
            assert_eq!(
                resolve_landing(Some(&session(Some(role)))),
                Route::StudentCourses,
                "role {role}"
            );
        }
    }

    #[test]
    fn blank_role_claim_lands_on_login() {
        let now = chrono::Utc::now();
        for blank in ["", "  "] {
            let claims = SessionClaims {
                sub: UserId::new(),
                role: Some(blank.to_string()),
                issued_at: now,
                expires_at: now + chrono::Duration::minutes(5),
            };
            let s = Session::from_claims(&claims);
            assert_eq!(resolve_landing(Some(&s)), Route::Login, "claim {blank:?}");
        }
    }

    #[test]
    fn unrecognized_claim_lands_on_student_courses() {
        let s = session(Some(Role::from_claim("TEACHING_ASSISTANT")));
        assert_eq!(resolve_landing(Some(&s)), Route::StudentCourses);
    }
}
