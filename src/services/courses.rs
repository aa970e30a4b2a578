use std::sync::Arc;

use tracing::{error, info};

use crate::api::AcademyApi;
use crate::error::AppError;
use crate::filter::CourseCriteria;
use crate::forms::CourseForm;
use crate::models::Course;
use crate::models::course::categories;
use crate::notify::Notifier;
use crate::services::editor::Editor;
use crate::services::submission::{Attachments, SubmissionCoordinator, SubmitOutcome};
use crate::store::EntityListStore;

/// Course management screen: catalog list, filters and the course editor.
pub struct CoursesPage {
    api: Arc<dyn AcademyApi>,
    notifier: Arc<dyn Notifier>,
    coordinator: SubmissionCoordinator,
    store: EntityListStore<Course>,
    editor: Editor<CourseForm, String>,
}

impl CoursesPage {
    pub fn new(api: Arc<dyn AcademyApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            coordinator: SubmissionCoordinator::new(api.clone(), notifier.clone()),
            api,
            notifier,
            store: EntityListStore::new(),
            editor: Editor::Closed,
        }
    }

    pub async fn refresh(&mut self) -> Result<(), AppError> {
        match self.api.fetch_courses().await {
            Ok(courses) => {
                info!("loaded {} courses", courses.len());
                self.store.replace_all(courses);
                Ok(())
            }
            Err(e) => {
                error!("Error fetching courses: {}", e);
                self.notifier.error("Failed to load courses");
                Err(e)
            }
        }
    }

    pub fn apply_filters(&mut self, search: &str, category: &str) {
        self.store
            .set_criteria(CourseCriteria::from_inputs(search, category));
    }

    pub fn visible(&self) -> &[Course] {
        self.store.visible()
    }

    pub fn all(&self) -> &[Course] {
        self.store.all()
    }

    pub fn categories(&self) -> Vec<String> {
        categories(self.store.all())
    }

    pub fn find(&self, course_code: &str) -> Option<&Course> {
        self.store.find(|c| c.course_code == course_code)
    }

    pub fn editor(&self) -> &Editor<CourseForm, String> {
        &self.editor
    }

    pub fn form_mut(&mut self) -> Option<&mut CourseForm> {
        self.editor.form_mut()
    }

    pub fn is_submitting(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn open_create(&mut self) {
        self.editor = Editor::create(CourseForm::default());
    }

    pub fn open_edit(&mut self, course_code: &str) -> Result<(), AppError> {
        let course = self
            .find(course_code)
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_code)))?;
        self.editor = Editor::edit(course_code.to_string(), CourseForm::from_course(course));
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }

    /// Submit the open editor. On success the list is re-fetched and the
    /// editor closes; on failure the editor stays open for another try.
    pub async fn submit(&mut self, attachments: &Attachments) -> Result<SubmitOutcome, AppError> {
        let (form, mode) = self.editor.snapshot()?;
        let outcome = self
            .coordinator
            .submit_course(&form, attachments, &mode)
            .await?;

        self.close_editor();
        // The mutation already succeeded; a failed reload is reported but
        // does not undo that.
        let _ = self.refresh().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self, course_code: &str) -> Result<(), AppError> {
        if let Err(e) = self.api.delete_course(course_code).await {
            error!("Error deleting course {}: {}", course_code, e);
            self.notifier.error("Failed to delete course");
            return Err(e);
        }
        info!("course {} deleted", course_code);
        self.notifier.success("Course deleted successfully");
        self.refresh().await
    }
}
