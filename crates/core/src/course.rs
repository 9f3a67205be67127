//! Course catalog read model: a course owns ordered modules, each owning
//! ordered lessons.
//!
//! These are read-only snapshots. Authoring happens elsewhere; this crate only
//! traverses what storage returns.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{CourseId, LessonId, ModuleId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    pub position: u32,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub instructor_id: UserId,
    pub modules: Vec<Module>,
}

impl Course {
    /// All lesson ids across all modules, in module order.
    ///
    /// Lessons repeated across modules are kept as-is.
    pub fn lesson_ids(&self) -> Vec<LessonId> {
        self.modules
            .iter()
            .flat_map(|m| m.lessons.iter().map(|l| l.id))
            .collect()
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

impl Entity for Course {
    type Id = CourseId;

    fn id(&self) -> CourseId {
        self.id
    }
}
