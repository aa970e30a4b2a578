use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::api::{AcademyApi, FileUpload};
use crate::error::AppError;
use crate::forms::{ContactForm, CourseForm, TestimonialForm};
use crate::models::ContactPayload;
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Whether a submission creates a record or updates the one addressed by
/// its natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode<K> {
    Create,
    Update(K),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

/// Optional files that are uploaded before a course is saved.
#[derive(Debug, Clone, Default)]
pub struct Attachments {
    pub image: Option<FileUpload>,
    pub banner: Option<FileUpload>,
}

/// Runs one form submission at a time: uploads, then exactly one create or
/// update call, then reports the outcome through the notifier.
pub struct SubmissionCoordinator {
    api: Arc<dyn AcademyApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SubmissionState>,
}

/// Marks the coordinator busy for the lifetime of one submission.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish<T>(mut self, result: &Result<T, AppError>) {
        let next = if result.is_ok() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            *state = SubmissionState::Idle;
        }
    }
}

impl SubmissionCoordinator {
    pub fn new(api: Arc<dyn AcademyApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(SubmissionState::Idle)
    }

    pub fn is_busy(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    fn begin(&self) -> Result<InFlight<'_>, AppError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| AppError::SubmitFailed("submission state poisoned".to_string()))?;
        if *state == SubmissionState::Submitting {
            warn!("rejecting submit while another one is in flight");
            return Err(AppError::Busy);
        }
        *state = SubmissionState::Submitting;
        Ok(InFlight {
            state: &self.state,
            finished: false,
        })
    }

    pub async fn submit_course(
        &self,
        form: &CourseForm,
        attachments: &Attachments,
        mode: &SubmitMode<String>,
    ) -> Result<SubmitOutcome, AppError> {
        let flight = self.begin()?;
        let result = self.run_course(form, attachments, mode).await;
        flight.finish(&result);
        result
    }

    pub async fn submit_testimonial(
        &self,
        form: &TestimonialForm,
        mode: &SubmitMode<String>,
    ) -> Result<SubmitOutcome, AppError> {
        let flight = self.begin()?;
        let result = self.run_testimonial(form, mode).await;
        flight.finish(&result);
        result
    }

    /// Send a contact message, returning what was sent.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactPayload, AppError> {
        let flight = self.begin()?;
        let result = self.run_contact(form).await;
        flight.finish(&result);
        result
    }

    async fn run_course(
        &self,
        form: &CourseForm,
        attachments: &Attachments,
        mode: &SubmitMode<String>,
    ) -> Result<SubmitOutcome, AppError> {
        self.require(form.missing_required())?;

        let mut form = form.clone();
        if let Some(image) = &attachments.image {
            form.image = self.upload(image).await?;
        }
        if let Some(banner) = &attachments.banner {
            form.banner = self.upload(banner).await?;
        }

        let payload = form.to_payload();
        let result = match mode {
            SubmitMode::Create => self
                .api
                .create_course(&payload)
                .await
                .map(|_| SubmitOutcome::Created),
            SubmitMode::Update(course_code) => self
                .api
                .update_course(course_code, &payload)
                .await
                .map(|_| SubmitOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                let verb = match outcome {
                    SubmitOutcome::Created => "created",
                    SubmitOutcome::Updated => "updated",
                };
                info!("course {} {}", payload.course_code, verb);
                self.notifier
                    .success(&format!("Course {} successfully!", verb));
                Ok(outcome)
            }
            Err(e) => Err(self.fail(e, "Failed to save course")),
        }
    }

    async fn run_testimonial(
        &self,
        form: &TestimonialForm,
        mode: &SubmitMode<String>,
    ) -> Result<SubmitOutcome, AppError> {
        self.require(form.missing_required())?;

        let payload = form.to_payload();
        let result = match mode {
            SubmitMode::Create => self
                .api
                .create_testimonial(&payload)
                .await
                .map(|_| SubmitOutcome::Created),
            SubmitMode::Update(id) => self
                .api
                .update_testimonial(id, &payload)
                .await
                .map(|_| SubmitOutcome::Updated),
        };

        match result {
            Ok(SubmitOutcome::Created) => {
                info!("testimonial from {} created", payload.name);
                self.notifier.success("Testimonial created successfully!");
                Ok(SubmitOutcome::Created)
            }
            Ok(SubmitOutcome::Updated) => {
                info!("testimonial from {} updated", payload.name);
                self.notifier.success("Testimonial updated successfully!");
                Ok(SubmitOutcome::Updated)
            }
            Err(e) => Err(self.fail(e, "Failed to save testimonial")),
        }
    }

    async fn run_contact(&self, form: &ContactForm) -> Result<ContactPayload, AppError> {
        self.require(form.missing_required())?;

        let payload = form.to_payload();
        match self.api.send_contact(&payload).await {
            Ok(()) => {
                info!("contact message sent for {}", payload.email);
                self.notifier.success("Message sent successfully!");
                Ok(payload)
            }
            Err(e) => Err(self.fail(e, "Failed to send message")),
        }
    }

    fn require(&self, missing: Vec<&'static str>) -> Result<(), AppError> {
        if missing.is_empty() {
            return Ok(());
        }
        let message = format!("Missing required fields: {}", missing.join(", "));
        self.notifier.error(&message);
        Err(AppError::Validation(message))
    }

    async fn upload(&self, file: &FileUpload) -> Result<String, AppError> {
        match self.api.upload_image(file).await {
            Ok(url) => Ok(url),
            Err(e) => {
                error!("image upload failed for {}: {}", file.file_name, e);
                self.notifier.error("Failed to upload image");
                Err(AppError::UploadFailed(e.to_string()))
            }
        }
    }

    /// Surface a failed create/update and normalize the error returned to
    /// the caller.
    fn fail(&self, err: AppError, fallback: &str) -> AppError {
        let message = err.user_message(fallback);
        error!("{}: {}", fallback, err);
        self.notifier.error(&message);

        match err {
            AppError::Network(_) | AppError::Validation(_) | AppError::Auth { .. } => err,
            _ => AppError::SubmitFailed(message),
        }
    }
}
