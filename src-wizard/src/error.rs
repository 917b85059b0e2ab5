use crate::options::SetField;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("'{value}' is not a valid option for {field}")]
    UnknownOption { field: SetField, value: String },

    #[error("Simulation request is invalid ({} field(s) failing)", .0.len())]
    InvalidDraft(ValidationErrors),

    #[error("This action is only available on page {expected}")]
    WrongPage { expected: u8 },

    #[error("The confirmation step is not open")]
    ConfirmationNotOpen,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("The simulation has already been submitted")]
    AlreadySubmitted,

    #[error("The wizard has been closed")]
    Closed,

    #[error(transparent)]
    Results(#[from] deboard_results::ResultsError),
}
