//! Named navigation targets and redirect URL construction.

use serde::Serialize;

/// Landing pages the navigation layer can send a request to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    StudentCourses,
    InstructorCourses,
    MentorDashboard,
    AdminDashboard,
}

impl Route {
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::StudentCourses => "/student/courses",
            Route::InstructorCourses => "/instructor/courses",
            Route::MentorDashboard => "/mentor",
            Route::AdminDashboard => "/admin",
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Login URL carrying the originally requested path as `callbackUrl`, so the
/// identity provider can send the user back after authenticating.
pub fn login_redirect(original_path: &str) -> String {
    let callback: String = url::form_urlencoded::byte_serialize(original_path.as_bytes()).collect();
    format!("{}?callbackUrl={}", Route::Login.as_path(), callback)
}
