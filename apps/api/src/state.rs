use subportal_application::{AuthorizationService, SubmissionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub submission_service: SubmissionService,
}
