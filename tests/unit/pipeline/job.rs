use super::*;
use crate::foundation::error::ErrorKind;

#[test]
fn request_uses_camel_case_fields() {
    let req: JobRequest =
        serde_json::from_str(r#"{ "bio": "Chef", "creatorName": "Sam" }"#).unwrap();
    assert_eq!(req, JobRequest::new("Sam", "Chef"));
    assert!(serde_json::from_str::<JobRequest>(r#"{ "bio": "Chef" }"#).is_err());
}

#[test]
fn field_limit_counts_characters() {
    JobRequest::new("a".repeat(40), "é".repeat(40)).validate().unwrap();
    let err = JobRequest::new("a".repeat(41), "").validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("creatorName"));
    assert!(JobRequest::new("", "b".repeat(41)).validate().is_err());
}

#[test]
fn stages_advance_in_order() {
    use JobStage::*;
    assert!(Init.can_advance(Decoding));
    assert!(Decoding.can_advance(Annotating));
    assert!(Annotating.can_advance(Encoding));
    assert!(Encoding.can_advance(Remuxing));
    assert!(!Init.can_advance(Encoding));
    assert!(!Remuxing.can_advance(Decoding));
}

#[test]
fn any_working_stage_can_drop_to_cleanup() {
    use JobStage::*;
    for s in [Init, Decoding, Annotating, Encoding, Remuxing] {
        assert!(s.can_advance(CleaningUp), "{s}");
    }
    assert!(!CleaningUp.can_advance(CleaningUp));
    assert!(!Succeeded.can_advance(CleaningUp));
    assert!(CleaningUp.can_advance(Succeeded));
    assert!(CleaningUp.can_advance(Failed));
    assert!(!Remuxing.can_advance(Succeeded));
}

#[test]
fn illegal_transition_is_rejected() {
    let mut job = Job::new(JobRequest::default());
    assert!(job.enter(JobStage::Remuxing).is_err());
    assert_eq!(job.stage(), JobStage::Init);
}

#[test]
fn finish_success_records_trail() {
    let mut job = Job::new(JobRequest::new("Sam", "Chef"));
    for s in [
        JobStage::Decoding,
        JobStage::Annotating,
        JobStage::Encoding,
        JobStage::Remuxing,
        JobStage::CleaningUp,
    ] {
        job.enter(s).unwrap();
    }
    job.set_frames(150);
    job.record_progress(100);
    let report = job.finish(Ok(PathBuf::from("out.mp4")), JobStage::Remuxing);
    assert!(report.outcome.is_success());
    assert_eq!(report.frames, 150);
    assert_eq!(report.progress_percent, 100);
    assert_eq!(report.stages.first(), Some(&JobStage::Init));
    assert_eq!(report.stages.last(), Some(&JobStage::Succeeded));
}

#[test]
fn finish_failure_keeps_failing_stage() {
    let mut job = Job::new(JobRequest::default());
    job.enter(JobStage::Decoding).unwrap();
    job.enter(JobStage::CleaningUp).unwrap();
    let report = job.finish(Err(OverlayError::decode("boom")), JobStage::Decoding);
    match &report.outcome {
        JobOutcome::Failed { stage, error } => {
            assert_eq!(*stage, JobStage::Decoding);
            assert_eq!(error.kind(), ErrorKind::Decode);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        report.stages,
        vec![
            JobStage::Init,
            JobStage::Decoding,
            JobStage::CleaningUp,
            JobStage::Failed
        ]
    );
}
