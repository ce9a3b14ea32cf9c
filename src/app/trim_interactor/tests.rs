// Unit tests for the trim interactor

use super::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::errors::{ProbeError, ValidationError};
use crate::domain::model::ToolFailure;
use crate::domain::rules::RangeViolation;

struct MockProbe {
    result: Result<MediaProbeResult, DomainError>,
    calls: Mutex<usize>,
}

impl MockProbe {
    fn duration(seconds: f64) -> Self {
        Self::returning(Ok(MediaProbeResult::new(seconds)))
    }

    fn returning(result: Result<MediaProbeResult, DomainError>) -> Self {
        Self {
            result,
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ProbePort for MockProbe {
    async fn probe_duration(&self, _file_path: &Path) -> Result<MediaProbeResult, DomainError> {
        *self.calls.lock().unwrap() += 1;
        self.result.clone()
    }
}

/// Executor that "writes" the output into the mock filesystem before reporting its result
struct MockExec {
    fs: Arc<MockFs>,
    result: Result<(), DomainError>,
    writes_output: bool,
    requests: Mutex<Vec<TrimRequest>>,
}

impl MockExec {
    fn new(fs: Arc<MockFs>, result: Result<(), DomainError>, writes_output: bool) -> Self {
        Self {
            fs,
            result,
            writes_output,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ExecutePort for MockExec {
    async fn stream_copy(&self, request: &TrimRequest) -> Result<(), DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.writes_output {
            self.fs.add(&request.output_path);
        }
        self.result.clone()
    }
}

#[derive(Default)]
struct MockFs {
    files: Mutex<HashSet<PathBuf>>,
}

impl MockFs {
    fn with_files(paths: &[&str]) -> Arc<Self> {
        let fs = Self::default();
        for path in paths {
            fs.add(Path::new(path));
        }
        Arc::new(fs)
    }

    fn add(&self, path: &Path) {
        self.files.lock().unwrap().insert(path.to_path_buf());
    }

    fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains(Path::new(path))
    }
}

#[async_trait]
impl FsPort for MockFs {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        Ok(self.files.lock().unwrap().contains(file_path))
    }

    async fn remove_file(&self, file_path: &Path) -> Result<bool, DomainError> {
        Ok(self.files.lock().unwrap().remove(file_path))
    }
}

struct Harness {
    probe: Arc<MockProbe>,
    exec: Arc<MockExec>,
    fs: Arc<MockFs>,
    interactor: TrimInteractor,
}

fn harness(probe: MockProbe, fs: Arc<MockFs>, exec_result: Result<(), DomainError>, writes_output: bool) -> Harness {
    let probe = Arc::new(probe);
    let exec = Arc::new(MockExec::new(Arc::clone(&fs), exec_result, writes_output));
    let interactor = TrimInteractor::new(
        Arc::clone(&probe) as Arc<dyn ProbePort>,
        Arc::clone(&exec) as Arc<dyn ExecutePort>,
        Arc::clone(&fs) as Arc<dyn FsPort>,
    );
    Harness {
        probe,
        exec,
        fs,
        interactor,
    }
}

#[tokio::test]
async fn test_valid_range_succeeds() {
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4"]), Ok(()), true);
    let request = TrimRequest::new("in.mp4", 5.0, 10.0, "out.mp4");

    let outcome = h.interactor.trim(&request).await;

    assert_eq!(
        outcome,
        TrimOutcome::Success {
            output_path: PathBuf::from("out.mp4")
        }
    );
    assert_eq!(h.exec.requests.lock().unwrap()[0], request);
    assert!(h.fs.contains("out.mp4"));
}

#[tokio::test]
async fn test_missing_input_fails_before_probe() {
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&[]), Ok(()), true);
    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 0.0, 1.0, "out.mp4")).await;

    assert_eq!(
        outcome,
        TrimOutcome::ValidationFailure {
            reason: ValidationError::InputMissing {
                path: PathBuf::from("in.mp4")
            }
        }
    );
    assert_eq!(h.probe.calls(), 0);
    assert_eq!(h.exec.calls(), 0);
}

#[tokio::test]
async fn test_probe_failure_is_validation_failure() {
    let probe = MockProbe::returning(Err(DomainError::ProbeFailed(ProbeError::new(
        "ffprobe exited with code 1",
        "in.mp4: Invalid data found when processing input",
    ))));
    let h = harness(probe, MockFs::with_files(&["in.mp4"]), Ok(()), true);

    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 0.0, 1.0, "out.mp4")).await;

    match outcome {
        TrimOutcome::ValidationFailure {
            reason: ValidationError::Probe(err),
        } => assert!(err.diagnostics.contains("Invalid data")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(h.exec.calls(), 0);
}

#[tokio::test]
async fn test_end_beyond_duration_is_rejected_without_invoking_tool() {
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4", "out.mp4"]), Ok(()), true);

    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 5.0, 50.0, "out.mp4")).await;

    match &outcome {
        TrimOutcome::ValidationFailure {
            reason: ValidationError::Range(violation),
        } => {
            assert_eq!(
                violation.to_string(),
                "end exceeds duration: requested 50.0, available 42.50"
            );
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(h.exec.calls(), 0);
    // Pre-existing output is untouched when the tool never ran
    assert!(h.fs.contains("out.mp4"));
}

#[tokio::test]
async fn test_zero_length_range_is_rejected() {
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4"]), Ok(()), true);
    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 0.0, 0.0, "out.mp4")).await;
    assert!(matches!(
        outcome,
        TrimOutcome::ValidationFailure {
            reason: ValidationError::Range(RangeViolation::StartNotBeforeEnd { .. })
        }
    ));
}

#[tokio::test]
async fn test_missing_tool_creates_no_output() {
    let missing = DomainError::ToolMissing {
        tool: "ffmpeg".to_string(),
        program: PathBuf::from("ffmpeg"),
    };
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4"]), Err(missing), false);

    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 5.0, 10.0, "out.mp4")).await;

    assert!(matches!(outcome, TrimOutcome::ToolNotFound { ref tool, .. } if tool == "ffmpeg"));
    assert!(!h.fs.contains("out.mp4"));
}

#[tokio::test]
async fn test_tool_failure_removes_partial_output() {
    let failure = ToolFailure {
        exit_code: Some(1),
        stdout: String::new(),
        stderr: "Invalid NAL unit size".to_string(),
    };
    let h = harness(
        MockProbe::duration(42.5),
        MockFs::with_files(&["in.mp4"]),
        Err(DomainError::ToolFailed(failure.clone())),
        true,
    );

    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 5.0, 10.0, "out.mp4")).await;

    assert_eq!(outcome, TrimOutcome::ToolExecutionFailure(failure));
    assert!(!h.fs.contains("out.mp4"));
}

#[tokio::test]
async fn test_unexpected_error_is_reported() {
    let h = harness(
        MockProbe::duration(42.5),
        MockFs::with_files(&["in.mp4"]),
        Err(DomainError::Unexpected("pipe closed".to_string())),
        false,
    );
    let outcome = h.interactor.trim(&TrimRequest::new("in.mp4", 5.0, 10.0, "out.mp4")).await;
    assert_eq!(
        outcome,
        TrimOutcome::UnexpectedFailure {
            message: "pipe closed".to_string()
        }
    );
}

#[tokio::test]
async fn test_each_trim_probes_again() {
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4"]), Ok(()), true);
    let request = TrimRequest::new("in.mp4", 5.0, 10.0, "out.mp4");

    assert!(h.interactor.trim(&request).await.is_success());
    assert!(h.interactor.trim(&request).await.is_success());

    assert_eq!(h.probe.calls(), 2);
    assert_eq!(h.exec.calls(), 2);
}

#[tokio::test]
async fn test_validator_tolerance_is_applied() {
    let h = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4"]), Ok(()), true);
    let request = TrimRequest::new("in.mp4", 0.0, 42.5004, "out.mp4");
    assert!(h.interactor.trim(&request).await.is_success());

    let strict = harness(MockProbe::duration(42.5), MockFs::with_files(&["in.mp4"]), Ok(()), true);
    let interactor = strict.interactor.with_validator(RangeValidator::exact());
    assert!(!interactor.trim(&request).await.is_success());
}

#[tokio::test]
async fn test_probe_duration_requires_existing_input() {
    let h = harness(MockProbe::duration(12.0), MockFs::with_files(&["in.mp4"]), Ok(()), true);
    assert_eq!(
        h.interactor.probe_duration(Path::new("in.mp4")).await.unwrap(),
        MediaProbeResult::new(12.0)
    );
    assert!(matches!(
        h.interactor.probe_duration(Path::new("other.mp4")).await,
        Err(DomainError::InputMissing { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_timed_out_trim_removes_partial_output() {
    use crate::adapters::process::test_support::write_tool_script;
    use crate::adapters::{FfmpegAdapter, LocalFsAdapter};
    use std::time::Duration;

    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("out.mp4");
    std::fs::write(&input, b"source").unwrap();
    let script = write_tool_script(
        dir.path(),
        "ffmpeg",
        "for last; do :; done\nprintf partial > \"${last#file:}\"\nexec sleep 5\n",
    );

    let interactor = TrimInteractor::new(
        Arc::new(MockProbe::duration(42.5)) as Arc<dyn ProbePort>,
        Arc::new(FfmpegAdapter::new(script, Some(Duration::from_millis(500)))) as Arc<dyn ExecutePort>,
        Arc::new(LocalFsAdapter::new()) as Arc<dyn FsPort>,
    );

    let outcome = interactor.trim(&TrimRequest::new(&input, 0.0, 1.0, &output)).await;

    match outcome {
        TrimOutcome::ToolExecutionFailure(failure) => assert_eq!(failure.exit_code, None),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!output.exists());
}
