//! Website generation jobs and their results.
//!
//! The generator itself runs elsewhere. These types pin down what a job looks
//! like while it moves through the queue and what a finished site contains.

use std::fmt;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{ApiError, UserId};

/// Maximum prompt length in characters.
pub const PROMPT_MAX: usize = 4000;

/// Maximum progress percentage.
pub const PROGRESS_MAX: u8 = 100;

/// Identifier of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Prompt validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptValidationError {
    /// Prompt was blank.
    #[error("prompt must not be empty")]
    Empty,
    /// Prompt exceeded [`PROMPT_MAX`] characters.
    #[error("prompt must be at most {max} characters")]
    TooLong {
        /// Maximum length in characters.
        max: usize,
    },
}

/// Natural-language description of the site to generate. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prompt(String);

impl Prompt {
    /// Validate and trim a prompt.
    pub fn new(prompt: impl AsRef<str>) -> Result<Self, PromptValidationError> {
        let trimmed = prompt.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PromptValidationError::Empty);
        }
        if trimmed.chars().count() > PROMPT_MAX {
            return Err(PromptValidationError::TooLong { max: PROMPT_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Prompt> for String {
    fn from(value: Prompt) -> Self {
        value.0
    }
}

impl TryFrom<String> for Prompt {
    type Error = PromptValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle state of a generation job.
///
/// ```text
/// queued ──► processing ──► completed
///   │            │
///   │            ├────────► failed
///   └────────────┴────────► cancelled
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Waiting for a worker.
    #[default]
    Queued,
    /// A worker is generating the site.
    Processing,
    /// The site was generated.
    Completed,
    /// Generation stopped with an error.
    Failed,
    /// The user cancelled the job.
    Cancelled,
}

impl GenerationStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Processing | Self::Cancelled)
                | (
                    Self::Processing,
                    Self::Completed | Self::Failed | Self::Cancelled
                )
        )
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected job updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobTransitionError {
    /// The lifecycle does not allow this move.
    #[error("cannot move generation job from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: GenerationStatus,
        /// Requested status.
        to: GenerationStatus,
    },
    /// Progress above [`PROGRESS_MAX`].
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u8),
    /// Progress reported for a job that is not processing.
    #[error("progress can only be reported while processing, job is {0}")]
    NotProcessing(GenerationStatus),
}

/// Job payloads whose members contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobValidationError {
    /// Progress above [`PROGRESS_MAX`].
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u8),
    /// A completed job reports less than full progress.
    #[error("completed jobs must report 100% progress, got {0}")]
    IncompleteProgress(u8),
    /// A failed job carries no cause.
    #[error("failed jobs must carry an error")]
    MissingError,
    /// A job that has not failed carries an error.
    #[error("only failed jobs may carry an error, job is {0}")]
    UnexpectedError(GenerationStatus),
}

/// A request to generate a site and its current state.
///
/// ## Invariants
/// - `progress` is within `0..=100` and equals 100 once completed.
/// - `error` is present exactly when `status` is `failed`.
/// - `updated_at` never precedes `created_at` for clock-driven updates.
///
/// The first two are re-checked on deserialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenerationJobDto", into = "GenerationJobDto")]
pub struct GenerationJob {
    id: JobId,
    user_id: UserId,
    prompt: Prompt,
    status: GenerationStatus,
    progress: u8,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    error: Option<ApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct GenerationJobDto {
    id: JobId,
    user_id: UserId,
    prompt: Prompt,
    status: GenerationStatus,
    progress: u8,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
}

impl From<GenerationJob> for GenerationJobDto {
    fn from(value: GenerationJob) -> Self {
        let GenerationJob {
            id,
            user_id,
            prompt,
            status,
            progress,
            created_at,
            updated_at,
            error,
        } = value;
        Self {
            id,
            user_id,
            prompt,
            status,
            progress,
            created_at,
            updated_at,
            error,
        }
    }
}

impl TryFrom<GenerationJobDto> for GenerationJob {
    type Error = JobValidationError;

    fn try_from(value: GenerationJobDto) -> Result<Self, Self::Error> {
        let GenerationJobDto {
            id,
            user_id,
            prompt,
            status,
            progress,
            created_at,
            updated_at,
            error,
        } = value;

        if progress > PROGRESS_MAX {
            return Err(JobValidationError::ProgressOutOfRange(progress));
        }
        if status == GenerationStatus::Completed && progress != PROGRESS_MAX {
            return Err(JobValidationError::IncompleteProgress(progress));
        }
        match (status, error.is_some()) {
            (GenerationStatus::Failed, false) => return Err(JobValidationError::MissingError),
            (GenerationStatus::Failed, true) | (_, false) => {}
            (other, true) => return Err(JobValidationError::UnexpectedError(other)),
        }

        Ok(Self {
            id,
            user_id,
            prompt,
            status,
            progress,
            created_at,
            updated_at,
            error,
        })
    }
}

impl GenerationJob {
    /// New job in the `queued` state, stamped with the clock's current time.
    #[must_use]
    pub fn queued(id: JobId, user_id: UserId, prompt: Prompt, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id,
            user_id,
            prompt,
            status: GenerationStatus::Queued,
            progress: 0,
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    /// Return the job moved to `next`, enforcing the lifecycle.
    ///
    /// Use [`GenerationJob::fail`] to enter the `failed` state so the cause is
    /// recorded.
    pub fn transition_to(
        &self,
        next: GenerationStatus,
        clock: &impl Clock,
    ) -> Result<Self, JobTransitionError> {
        if next == GenerationStatus::Failed || !self.status.can_transition_to(next) {
            return Err(JobTransitionError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        let progress = if next == GenerationStatus::Completed {
            PROGRESS_MAX
        } else {
            self.progress
        };
        Ok(Self {
            status: next,
            progress,
            updated_at: clock.utc(),
            ..self.clone()
        })
    }

    /// Return the job moved to `failed` with `error` recorded as the cause.
    pub fn fail(&self, error: ApiError, clock: &impl Clock) -> Result<Self, JobTransitionError> {
        if !self.status.can_transition_to(GenerationStatus::Failed) {
            return Err(JobTransitionError::InvalidTransition {
                from: self.status,
                to: GenerationStatus::Failed,
            });
        }
        Ok(Self {
            status: GenerationStatus::Failed,
            error: Some(error),
            updated_at: clock.utc(),
            ..self.clone()
        })
    }

    /// Return the job with updated progress. Only processing jobs report
    /// progress.
    pub fn with_progress(
        &self,
        progress: u8,
        clock: &impl Clock,
    ) -> Result<Self, JobTransitionError> {
        if progress > PROGRESS_MAX {
            return Err(JobTransitionError::ProgressOutOfRange(progress));
        }
        if self.status != GenerationStatus::Processing {
            return Err(JobTransitionError::NotProcessing(self.status));
        }
        Ok(Self {
            progress,
            updated_at: clock.utc(),
            ..self.clone()
        })
    }

    /// Job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Owner of the job.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// What the user asked for.
    #[must_use]
    pub const fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Completion percentage.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last state change.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Failure cause for `failed` jobs.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

/// A single file of a generated site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct GeneratedFile {
    /// Path relative to the site root, e.g. `index.html`.
    pub path: String,
    /// MIME type, e.g. `text/html`.
    pub content_type: String,
    /// File contents.
    pub content: String,
}

/// Output of a completed generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct GenerationResult {
    /// Job that produced the site.
    pub job_id: JobId,
    /// Files making up the site.
    pub files: Vec<GeneratedFile>,
    /// Hosted preview location, when one was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// When generation finished.
    pub completed_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Root `index.html`, if the site has one.
    #[must_use]
    pub fn entry_point(&self) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| {
            let path = file.path.trim_start_matches("./").trim_start_matches('/');
            path == "index.html"
        })
    }
}

#[cfg(test)]
mod tests;
