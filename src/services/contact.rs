use std::sync::Arc;

use crate::api::AcademyApi;
use crate::error::AppError;
use crate::forms::ContactForm;
use crate::models::ContactMessage;
use crate::notify::Notifier;
use crate::services::submission::SubmissionCoordinator;

/// Contact form tester. Sent messages are kept for this session only,
/// newest first.
pub struct ContactPage {
    coordinator: SubmissionCoordinator,
    form: ContactForm,
    sent: Vec<ContactMessage>,
}

impl ContactPage {
    pub fn new(api: Arc<dyn AcademyApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            coordinator: SubmissionCoordinator::new(api, notifier),
            form: ContactForm::default(),
            sent: Vec::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn sent(&self) -> &[ContactMessage] {
        &self.sent
    }

    pub fn sent_label(&self) -> String {
        let count = self.sent.len();
        format!("{} message{} sent", count, if count == 1 { "" } else { "s" })
    }

    pub async fn send(&mut self) -> Result<&ContactMessage, AppError> {
        let payload = self.coordinator.submit_contact(&self.form).await?;
        self.form = ContactForm::default();
        self.sent.insert(0, ContactMessage::from_payload(payload));
        Ok(&self.sent[0])
    }
}
