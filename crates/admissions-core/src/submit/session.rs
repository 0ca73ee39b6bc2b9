//! Form session: one mounted form wired to its notification and navigation shell.

use std::sync::Arc;

use super::{RecordStore, Route, SubmissionGateway, SubmitResult};
use crate::form::{AdmissionForm, FieldInput, FormIntent, FormResult};
use crate::models::FormMode;

/// Toast-style user notifications. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Router the form hands control back to.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// A mounted intake form: owns the drafts, submits through the gateway, and reports
/// outcomes to the injected collaborators.
pub struct FormSession<S> {
    form: AdmissionForm,
    gateway: SubmissionGateway<S>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl<S: RecordStore> FormSession<S> {
    pub fn new(store: S, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            form: AdmissionForm::new(),
            gateway: SubmissionGateway::new(store),
            notifier,
            navigator,
        }
    }

    pub fn form(&self) -> &AdmissionForm {
        &self.form
    }

    pub fn gateway(&self) -> &SubmissionGateway<S> {
        &self.gateway
    }

    pub fn set_mode(&mut self, mode: FormMode) {
        self.form.set_mode(mode);
    }

    pub fn update_field(&mut self, name: &str, input: FieldInput) -> FormResult<()> {
        self.form.update_field(name, input)
    }

    pub fn apply(&mut self, intent: FormIntent) -> FormResult<()> {
        self.form.apply(intent)
    }

    /// Submit the active draft.
    ///
    /// Success notifies and navigates to the dashboard. Failure notifies only; the
    /// drafts stay as they are so the user can resubmit.
    pub async fn submit(&self) -> SubmitResult {
        let result = self.gateway.submit(&self.form).await;
        match &result {
            Ok(submitted) => {
                self.notifier.success(submitted.message);
                self.navigator.navigate(submitted.redirect);
            }
            Err(failure) => self.notifier.error(failure.message),
        }
        result
    }

    /// Leave the form without saving.
    pub fn cancel(&self) {
        self.navigator.navigate(Route::Dashboard);
    }
}
