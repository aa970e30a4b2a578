use crate::error::AppError;
use crate::services::submission::SubmitMode;

/// The create/edit form a page currently shows, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor<F, K> {
    Closed,
    Open { form: F, mode: SubmitMode<K> },
}

impl<F: Clone, K: Clone> Editor<F, K> {
    pub fn create(form: F) -> Self {
        Editor::Open {
            form,
            mode: SubmitMode::Create,
        }
    }

    pub fn edit(key: K, form: F) -> Self {
        Editor::Open {
            form,
            mode: SubmitMode::Update(key),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Open { .. })
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            Editor::Open { form, .. } => Some(form),
            Editor::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Editor::Open { form, .. } => Some(form),
            Editor::Closed => None,
        }
    }

    pub fn mode(&self) -> Option<&SubmitMode<K>> {
        match self {
            Editor::Open { mode, .. } => Some(mode),
            Editor::Closed => None,
        }
    }

    /// Copy out the form and mode to submit.
    pub fn snapshot(&self) -> Result<(F, SubmitMode<K>), AppError> {
        match self {
            Editor::Open { form, mode } => Ok((form.clone(), mode.clone())),
            Editor::Closed => Err(AppError::Validation("No form is open".to_string())),
        }
    }
}
