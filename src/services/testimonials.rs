use std::sync::Arc;

use tracing::{error, info};

use crate::api::AcademyApi;
use crate::error::AppError;
use crate::filter::TestimonialCriteria;
use crate::forms::TestimonialForm;
use crate::models::Testimonial;
use crate::notify::Notifier;
use crate::services::editor::Editor;
use crate::services::submission::{SubmissionCoordinator, SubmitOutcome};
use crate::store::EntityListStore;

pub struct TestimonialsPage {
    api: Arc<dyn AcademyApi>,
    notifier: Arc<dyn Notifier>,
    coordinator: SubmissionCoordinator,
    store: EntityListStore<Testimonial>,
    editor: Editor<TestimonialForm, String>,
}

impl TestimonialsPage {
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
        match self.api.fetch_testimonials().await {
            Ok(testimonials) => {
                info!("loaded {} testimonials", testimonials.len());
                self.store.replace_all(testimonials);
                Ok(())
            }
            Err(e) => {
                error!("Error fetching testimonials: {}", e);
                self.notifier.error("Failed to load testimonials");
                Err(e)
            }
        }
    }

    /// Raw selector values; see [`TestimonialCriteria::from_inputs`].
    pub fn apply_filters(&mut self, search: &str, rating: &str, featured: &str) {
        self.store
            .set_criteria(TestimonialCriteria::from_inputs(search, rating, featured));
    }

    pub fn visible(&self) -> &[Testimonial] {
        self.store.visible()
    }

    pub fn all(&self) -> &[Testimonial] {
        self.store.all()
    }

    pub fn find(&self, id: &str) -> Option<&Testimonial> {
        self.store.find(|t| t.id == id)
    }

    pub fn editor(&self) -> &Editor<TestimonialForm, String> {
        &self.editor
    }

    pub fn form_mut(&mut self) -> Option<&mut TestimonialForm> {
        self.editor.form_mut()
    }

    pub fn is_submitting(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn open_create(&mut self) {
        self.editor = Editor::create(TestimonialForm::default());
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), AppError> {
        let testimonial = self
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("testimonial {}", id)))?;
        self.editor = Editor::edit(id.to_string(), TestimonialForm::from_testimonial(testimonial));
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        let (form, mode) = self.editor.snapshot()?;
        let outcome = self.coordinator.submit_testimonial(&form, &mode).await?;

        self.close_editor();
        let _ = self.refresh().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        if let Err(e) = self.api.delete_testimonial(id).await {
            error!("Error deleting testimonial {}: {}", id, e);
            self.notifier.error("Failed to delete testimonial");
            return Err(e);
        }
        info!("testimonial {} deleted", id);
        self.notifier.success("Testimonial deleted successfully");
        self.refresh().await
    }
}
