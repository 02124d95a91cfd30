//! Tests for generation job lifecycle and result helpers.

use std::sync::Mutex;

use super::*;
use chrono::{Duration, Local, TimeZone};
use rstest::{fixture, rstest};
use serde_json::json;

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that moves forward one minute every time it is read.
struct TickingClock {
    now: Mutex<DateTime<Utc>>,
}

impl TickingClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().expect("clock lock");
        let current = *now;
        *now = current + Duration::minutes(1);
        current
    }
}

#[rstest]
fn ticking_clock_is_shared_across_threads(clock: TickingClock) {
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| clock.utc());
        }
    });
    assert_eq!(clock.utc(), fixture_timestamp() + Duration::minutes(4));
}

#[fixture]
fn clock() -> TickingClock {
    TickingClock::starting_at(fixture_timestamp())
}

#[fixture]
fn queued_job(clock: TickingClock) -> GenerationJob {
    GenerationJob::queued(
        JobId::from_uuid(Uuid::nil()),
        UserId::new(USER_ID).expect("fixture id is valid"),
        Prompt::new("A portfolio site for a ceramicist").expect("fixture prompt is valid"),
        &clock,
    )
}

#[rstest]
fn queued_jobs_start_empty(queued_job: GenerationJob) {
    assert_eq!(queued_job.status(), GenerationStatus::Queued);
    assert_eq!(queued_job.progress(), 0);
    assert_eq!(queued_job.created_at(), fixture_timestamp());
    assert_eq!(queued_job.updated_at(), fixture_timestamp());
    assert!(queued_job.error().is_none());
}

#[rstest]
fn happy_path_reaches_completed(queued_job: GenerationJob, clock: TickingClock) {
    let processing = queued_job
        .transition_to(GenerationStatus::Processing, &clock)
        .expect("queued jobs can start");
    let halfway = processing
        .with_progress(50, &clock)
        .expect("processing jobs report progress");
    let done = halfway
        .transition_to(GenerationStatus::Completed, &clock)
        .expect("processing jobs can complete");

    assert_eq!(halfway.progress(), 50);
    assert_eq!(done.status(), GenerationStatus::Completed);
    assert_eq!(done.progress(), PROGRESS_MAX);
    assert!(done.updated_at() > processing.updated_at());
    assert_eq!(done.created_at(), queued_job.created_at());
    assert!(done.status().is_terminal());
}

#[rstest]
fn failing_records_the_cause(queued_job: GenerationJob, clock: TickingClock) {
    let processing = queued_job
        .transition_to(GenerationStatus::Processing, &clock)
        .expect("queued jobs can start");
    let failed = processing
        .fail(ApiError::timeout("model did not respond"), &clock)
        .expect("processing jobs can fail");

    assert_eq!(failed.status(), GenerationStatus::Failed);
    assert_eq!(
        failed.error().map(ApiError::code),
        Some(crate::domain::ErrorCode::Timeout)
    );
}

const fn job_summary(job: &GenerationJob) -> (GenerationStatus, u8, bool) {
    (job.status(), job.progress(), job.error().is_some())
}

#[rstest]
fn job_accessors_are_const(queued_job: GenerationJob, clock: TickingClock) {
    assert_eq!(job_summary(&queued_job), (GenerationStatus::Queued, 0, false));

    let failed = queued_job
        .transition_to(GenerationStatus::Processing, &clock)
        .and_then(|job| job.fail(ApiError::internal("crash"), &clock))
        .expect("processing jobs can fail");
    assert_eq!(job_summary(&failed).0, GenerationStatus::Failed);
    assert!(job_summary(&failed).2);
}

#[rstest]
fn failed_state_requires_fail(queued_job: GenerationJob, clock: TickingClock) {
    let processing = queued_job
        .transition_to(GenerationStatus::Processing, &clock)
        .expect("queued jobs can start");
    assert_eq!(
        processing.transition_to(GenerationStatus::Failed, &clock),
        Err(JobTransitionError::InvalidTransition {
            from: GenerationStatus::Processing,
            to: GenerationStatus::Failed,
        })
    );
}

#[rstest]
#[case(GenerationStatus::Queued, GenerationStatus::Processing, true)]
#[case(GenerationStatus::Queued, GenerationStatus::Cancelled, true)]
#[case(GenerationStatus::Queued, GenerationStatus::Completed, false)]
#[case(GenerationStatus::Queued, GenerationStatus::Failed, false)]
#[case(GenerationStatus::Processing, GenerationStatus::Completed, true)]
#[case(GenerationStatus::Processing, GenerationStatus::Failed, true)]
#[case(GenerationStatus::Processing, GenerationStatus::Cancelled, true)]
#[case(GenerationStatus::Processing, GenerationStatus::Queued, false)]
#[case(GenerationStatus::Completed, GenerationStatus::Processing, false)]
#[case(GenerationStatus::Failed, GenerationStatus::Queued, false)]
#[case(GenerationStatus::Cancelled, GenerationStatus::Processing, false)]
fn lifecycle_graph(
    #[case] from: GenerationStatus,
    #[case] to: GenerationStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[rstest]
fn cancelled_jobs_cannot_fail(queued_job: GenerationJob, clock: TickingClock) {
    let cancelled = queued_job
        .transition_to(GenerationStatus::Cancelled, &clock)
        .expect("queued jobs can be cancelled");
    assert!(matches!(
        cancelled.fail(ApiError::internal("late"), &clock),
        Err(JobTransitionError::InvalidTransition { .. })
    ));
}

#[rstest]
fn progress_rules(queued_job: GenerationJob, clock: TickingClock) {
    assert_eq!(
        queued_job.with_progress(10, &clock),
        Err(JobTransitionError::NotProcessing(GenerationStatus::Queued))
    );
    let processing = queued_job
        .transition_to(GenerationStatus::Processing, &clock)
        .expect("queued jobs can start");
    assert_eq!(
        processing.with_progress(101, &clock),
        Err(JobTransitionError::ProgressOutOfRange(101))
    );
}

#[rstest]
#[case("", PromptValidationError::Empty)]
#[case("   \n", PromptValidationError::Empty)]
fn blank_prompts_are_rejected(#[case] raw: &str, #[case] expected: PromptValidationError) {
    assert_eq!(Prompt::new(raw), Err(expected));
}

#[rstest]
fn prompts_are_trimmed_and_bounded() {
    let prompt = Prompt::new("  a bakery landing page  ").expect("valid prompt");
    assert_eq!(prompt.as_ref(), "a bakery landing page");
    assert_eq!(
        Prompt::new("x".repeat(PROMPT_MAX + 1)),
        Err(PromptValidationError::TooLong { max: PROMPT_MAX })
    );
    assert!(Prompt::new("x".repeat(PROMPT_MAX)).is_ok());
}

#[rstest]
fn job_wire_format(queued_job: GenerationJob, clock: TickingClock) {
    let processing = queued_job
        .transition_to(GenerationStatus::Processing, &clock)
        .expect("queued jobs can start");
    let failed = processing
        .fail(ApiError::service_unavailable("renderer offline"), &clock)
        .expect("processing jobs can fail");

    let value = serde_json::to_value(&failed).expect("job serialises");
    assert_eq!(
        value,
        json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "userId": USER_ID,
            "prompt": "A portfolio site for a ceramicist",
            "status": "failed",
            "progress": 0,
            "createdAt": "2026-03-01T09:00:00Z",
            "updatedAt": "2026-03-01T09:01:00Z",
            "error": { "code": "SERVICE_UNAVAILABLE", "message": "renderer offline" }
        })
    );
    let decoded: GenerationJob = serde_json::from_value(value).expect("job deserialises");
    assert_eq!(decoded, failed);
}

fn job_payload(status: &str, progress: u8, error: Option<serde_json::Value>) -> serde_json::Value {
    let mut payload = json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "userId": USER_ID,
        "prompt": "A bakery landing page",
        "status": status,
        "progress": progress,
        "createdAt": "2026-03-01T09:00:00Z",
        "updatedAt": "2026-03-01T09:01:00Z"
    });
    if let (Some(object), Some(error)) = (payload.as_object_mut(), error) {
        object.insert("error".to_owned(), error);
    }
    payload
}

#[rstest]
#[case("queued", 250, None, JobValidationError::ProgressOutOfRange(250))]
#[case("completed", 40, None, JobValidationError::IncompleteProgress(40))]
#[case("failed", 10, None, JobValidationError::MissingError)]
#[case(
    "queued",
    0,
    Some(json!({ "code": "TIMEOUT", "message": "slow" })),
    JobValidationError::UnexpectedError(GenerationStatus::Queued)
)]
#[case(
    "completed",
    100,
    Some(json!({ "code": "TIMEOUT", "message": "slow" })),
    JobValidationError::UnexpectedError(GenerationStatus::Completed)
)]
fn inconsistent_jobs_are_rejected_on_input(
    #[case] status: &str,
    #[case] progress: u8,
    #[case] error: Option<serde_json::Value>,
    #[case] expected: JobValidationError,
) {
    let err = serde_json::from_value::<GenerationJob>(job_payload(status, progress, error))
        .expect_err("inconsistent job must be rejected");
    assert!(
        err.to_string().contains(&expected.to_string()),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case("processing", 40, None)]
#[case("completed", 100, None)]
#[case("cancelled", 70, None)]
#[case("failed", 30, Some(json!({ "code": "INTERNAL_ERROR", "message": "boom" })))]
fn consistent_jobs_are_accepted_on_input(
    #[case] status: &str,
    #[case] progress: u8,
    #[case] error: Option<serde_json::Value>,
) {
    let job: GenerationJob = serde_json::from_value(job_payload(status, progress, error))
        .expect("consistent job decodes");
    assert_eq!(job.progress(), progress);
}

#[rstest]
#[case("index.html", true)]
#[case("./index.html", true)]
#[case("/index.html", true)]
#[case("about/index.html", false)]
fn entry_point_lookup(#[case] path: &str, #[case] found: bool) {
    let result = GenerationResult {
        job_id: JobId::random(),
        files: vec![
            GeneratedFile {
                path: "styles.css".to_owned(),
                content_type: "text/css".to_owned(),
                content: "body {}".to_owned(),
            },
            GeneratedFile {
                path: path.to_owned(),
                content_type: "text/html".to_owned(),
                content: "<html></html>".to_owned(),
            },
        ],
        preview_url: None,
        completed_at: fixture_timestamp(),
    };

    assert_eq!(result.entry_point().is_some(), found);
}
