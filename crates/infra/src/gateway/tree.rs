//! Rebuilds course trees from flat `courses ⟕ modules ⟕ lessons` rows.

use uuid::Uuid;

use learnhub_core::{Course, CourseId, Lesson, LessonId, Module, ModuleId, UserId};
use learnhub_progress::GatewayError;

/// One row of the course/module/lesson left join.
///
/// Module columns are NULL for a course without modules; lesson columns are
/// NULL for a module without lessons.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct CourseTreeRow {
    pub course_id: Uuid,
    pub course_title: String,
    pub instructor_id: Uuid,
    pub module_id: Option<Uuid>,
    pub module_title: Option<String>,
    pub module_position: Option<i32>,
    pub lesson_id: Option<Uuid>,
    pub lesson_title: Option<String>,
    pub lesson_position: Option<i32>,
}

/// Group rows into courses, keeping row order (the query sorts by position).
pub(crate) fn assemble(rows: impl IntoIterator<Item = CourseTreeRow>) -> Result<Vec<Course>, GatewayError> {
    let mut courses: Vec<Course> = Vec::new();

    for row in rows {
        let course_id = CourseId::from_uuid(row.course_id);
        if courses.last().map(|c| c.id) != Some(course_id) {
            courses.push(Course {
                id: course_id,
                title: row.course_title.clone(),
                instructor_id: UserId::from_uuid(row.instructor_id),
                modules: Vec::new(),
            });
        }
        let Some(course) = courses.last_mut() else {
            continue;
        };

        let Some(module_id) = row.module_id.map(ModuleId::from_uuid) else {
            continue;
        };
        if course.modules.last().map(|m| m.id) != Some(module_id) {
            course.modules.push(Module {
                id: module_id,
                title: row.module_title.clone().unwrap_or_default(),
                position: position("module", row.module_position)?,
                lessons: Vec::new(),
            });
        }
        let Some(module) = course.modules.last_mut() else {
            continue;
        };

        if let Some(lesson_id) = row.lesson_id {
            module.lessons.push(Lesson {
                id: LessonId::from_uuid(lesson_id),
                title: row.lesson_title.unwrap_or_default(),
                position: position("lesson", row.lesson_position)?,
            });
        }
    }

    Ok(courses)
}

fn position(kind: &str, value: Option<i32>) -> Result<u32, GatewayError> {
    let value = value.unwrap_or_default();
    u32::try_from(value).map_err(|_| GatewayError::Decode(format!("negative {kind} position {value}")))
}
