//! Integration tests for enrollment rules and academic metrics

use ccrm::models::{CourseConfig, Grade, Semester};
use chrono::NaiveDate;
use ccrm::{EngineError, EnrollmentEngine, EnrollmentPolicy, RecordStore};

fn add_course(engine: &EnrollmentEngine, code: &str, credits: u32, semester: Semester) {
    engine
        .add_course(CourseConfig::new(code, format!("{code} title"), credits).semester(semester))
        .expect("Failed to add course");
}

fn add_student(engine: &EnrollmentEngine, reg_no: &str) {
    engine
        .add_student(&format!("Student {reg_no}"), &format!("{reg_no}@example.edu"), reg_no)
        .expect("Failed to add student");
}

/// Engine with one student S1 and the given courses
fn setup(courses: &[(&str, u32, Semester)]) -> EnrollmentEngine {
    let engine = EnrollmentEngine::default();
    for (code, credits, semester) in courses {
        add_course(&engine, code, *credits, *semester);
    }
    add_student(&engine, "S1");
    engine
}

#[test]
fn test_duplicate_enrollment_keeps_single_record() {
    let engine = setup(&[("CS101", 4, Semester::Fall)]);

    engine.enroll("S1", "CS101").expect("first enroll");
    let err = engine.enroll("S1", "CS101").unwrap_err();

    assert_eq!(
        err,
        EngineError::DuplicateEnrollment {
            reg_no: "S1".to_string(),
            course_code: "CS101".to_string(),
        }
    );
    let student = engine.find_student("S1").expect("student");
    assert_eq!(student.enrollments().len(), 1);
    assert_eq!(engine.read_store(RecordStore::enrollment_count), 1);
}

#[test]
fn test_credit_limit_applies_per_semester() {
    let engine = setup(&[
        ("FALL12", 12, Semester::Fall),
        ("FALL10", 10, Semester::Fall),
        ("SPR10", 10, Semester::Spring),
    ]);

    engine.enroll("S1", "FALL12").expect("12 credits in FALL");

    let err = engine.enroll("S1", "FALL10").unwrap_err();
    assert!(matches!(
        err,
        EngineError::CreditLimitExceeded {
            current: 12,
            requested: 10,
            limit: 18,
            semester: Semester::Fall,
            ..
        }
    ));
    assert!(err.to_string().contains("22"));

    engine.enroll("S1", "SPR10").expect("SPRING bucket is separate");
    assert_eq!(engine.semester_credits("S1", Semester::Fall), Ok(12));
    assert_eq!(engine.semester_credits("S1", Semester::Spring), Ok(10));
}

#[test]
fn test_failed_enroll_leaves_store_unchanged() {
    let engine = setup(&[("BIG", 18, Semester::Fall), ("ONE", 1, Semester::Fall)]);
    engine.enroll("S1", "BIG").expect("enroll");

    assert!(engine.enroll("S1", "ONE").is_err());
    assert!(engine.enroll("S1", "NOPE").is_err());
    assert!(engine.enroll("S404", "ONE").is_err());

    let student = engine.find_student("S1").expect("student");
    assert_eq!(student.enrollments().len(), 1);
    assert_eq!(engine.read_store(RecordStore::enrollment_count), 1);
}

#[test]
fn test_concurrent_enrollments_respect_ceiling() {
    let courses: Vec<(String, u32)> = (0..12).map(|i| (format!("C{i:02}"), 3)).collect();
    let engine = EnrollmentEngine::default();
    for (code, credits) in &courses {
        add_course(&engine, code, *credits, Semester::Fall);
    }
    add_student(&engine, "S1");

    std::thread::scope(|scope| {
        for (code, _) in &courses {
            let engine = &engine;
            scope.spawn(move || {
                let _ = engine.enroll("S1", code);
            });
        }
    });

    // 12 three-credit courses race for an 18-credit ceiling: exactly six fit
    assert_eq!(engine.semester_credits("S1", Semester::Fall), Ok(18));
    let student = engine.find_student("S1").expect("student");
    assert_eq!(student.enrollments().len(), 6);
}

#[test]
fn test_concurrent_duplicate_enrollment_single_winner() {
    let engine = setup(&[("CS101", 4, Semester::Fall)]);

    let successes = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.enroll("S1", "CS101").is_ok()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .filter(|ok| *ok)
            .count()
    });

    assert_eq!(successes, 1);
    assert_eq!(engine.read_store(RecordStore::enrollment_count), 1);
}

#[test]
fn test_gpa_without_grades_is_zero() {
    let engine = setup(&[("CS101", 4, Semester::Fall)]);
    assert_eq!(engine.calculate_gpa("S1"), Ok(0.0));

    engine.enroll("S1", "CS101").expect("enroll");
    assert_eq!(engine.calculate_gpa("S1"), Ok(0.0));
}

#[test]
fn test_gpa_is_credit_weighted() {
    let engine = setup(&[("THREE", 3, Semester::Fall), ("ONE", 1, Semester::Fall)]);
    engine.enroll("S1", "THREE").expect("enroll");
    engine.enroll("S1", "ONE").expect("enroll");
    engine.record_grade("S1", "THREE", Grade::A).expect("grade");
    engine.record_grade("S1", "ONE", Grade::F).expect("grade");

    let gpa = engine.calculate_gpa("S1").expect("gpa");
    assert!((gpa - 6.75).abs() < f64::EPSILON);
}

#[test]
fn test_top_students_order_and_ties() {
    let engine = EnrollmentEngine::default();
    add_course(&engine, "CS101", 4, Semester::Fall);
    for (reg_no, grade) in [
        ("S3", Grade::B),
        ("S1", Grade::A),
        ("S2", Grade::B),
        ("S4", Grade::S),
    ] {
        add_student(&engine, reg_no);
        engine.enroll(reg_no, "CS101").expect("enroll");
        engine.record_grade(reg_no, "CS101", grade).expect("grade");
    }
    add_student(&engine, "S5");

    let ranked = engine.top_students(10);
    let order: Vec<&str> = ranked.iter().map(|r| r.reg_no.as_str()).collect();
    assert_eq!(order, vec!["S4", "S1", "S2", "S3", "S5"]);
    assert!((ranked[0].gpa - 10.0).abs() < f64::EPSILON);
    assert!(ranked[4].gpa.abs() < f64::EPSILON);

    assert_eq!(engine.top_students(2).len(), 2);
    assert!(engine.top_students(0).is_empty());
}

#[test]
fn test_transcript_unknown_student() {
    let engine = EnrollmentEngine::default();
    assert_eq!(
        engine.generate_transcript("S404").unwrap_err(),
        EngineError::not_found("student", "S404")
    );
}

#[test]
fn test_transcript_lines_in_enrollment_order() {
    let engine = setup(&[
        ("MA101", 4, Semester::Fall),
        ("CS101", 3, Semester::Fall),
        ("PH101", 2, Semester::Spring),
    ]);
    for code in ["PH101", "MA101", "CS101"] {
        engine.enroll("S1", code).expect("enroll");
    }
    engine.record_grade("S1", "MA101", Grade::A).expect("grade");
    engine.record_grade("S1", "PH101", Grade::C).expect("grade");

    let transcript = engine.generate_transcript("S1").expect("transcript");

    let codes: Vec<&str> = transcript
        .lines
        .iter()
        .map(|l| l.course_code.as_str())
        .collect();
    assert_eq!(codes, vec!["PH101", "MA101", "CS101"]);
    assert_eq!(transcript.lines[2].grade, Grade::NotGraded);
    assert_eq!(transcript.total_credits(), 9);
    assert_eq!(transcript.graded_credits(), 6);
    // (2 * 7 + 4 * 9) / 6
    assert!((transcript.gpa - 50.0 / 6.0).abs() < 1e-9);
    assert_eq!(Ok(transcript.gpa), engine.calculate_gpa("S1"));
}

#[test]
fn test_policy_applies_custom_ceiling_and_lock() {
    let engine = EnrollmentEngine::new(
        RecordStore::new(),
        EnrollmentPolicy {
            max_credits_per_semester: 6,
            allow_grade_changes: false,
        },
    );
    add_course(&engine, "A", 4, Semester::Summer);
    add_course(&engine, "B", 3, Semester::Summer);
    add_student(&engine, "S1");

    engine.enroll("S1", "A").expect("enroll");
    assert!(matches!(
        engine.enroll("S1", "B"),
        Err(EngineError::CreditLimitExceeded { limit: 6, .. })
    ));

    engine.record_grade("S1", "A", Grade::D).expect("first grade");
    assert!(matches!(
        engine.record_grade("S1", "A", Grade::S),
        Err(EngineError::GradeLocked { grade: Grade::D, .. })
    ));
    assert_eq!(engine.calculate_gpa("S1"), Ok(6.0));
}

#[test]
fn test_into_store_keeps_records() {
    let engine = setup(&[("CS101", 4, Semester::Fall)]);
    engine.enroll("S1", "CS101").expect("enroll");

    let store = engine.into_store();
    assert_eq!(store.enrollment_count(), 1);
    assert!(store.get_course("CS101").is_some());

    let reopened = EnrollmentEngine::new(store, EnrollmentPolicy::default());
    assert!(matches!(
        reopened.enroll("S1", "CS101"),
        Err(EngineError::DuplicateEnrollment { .. })
    ));
}

#[test]
fn test_restored_large_credit_courses_do_not_overflow() {
    let engine = setup(&[
        ("HUGE1", u32::MAX, Semester::Fall),
        ("HUGE2", u32::MAX, Semester::Fall),
        ("ONE", 1, Semester::Fall),
    ]);
    let date = NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date");
    engine
        .restore_enrollment("S1", "HUGE1", Grade::A, date)
        .expect("restore HUGE1");
    engine
        .restore_enrollment("S1", "HUGE2", Grade::A, date)
        .expect("restore HUGE2");

    assert_eq!(engine.semester_credits("S1", Semester::Fall), Ok(u32::MAX));

    let err = engine.enroll("S1", "ONE").unwrap_err();
    assert!(matches!(err, EngineError::CreditLimitExceeded { .. }));
    assert!(err.to_string().contains(&u32::MAX.to_string()));

    let gpa = engine.calculate_gpa("S1").expect("gpa");
    assert!((gpa - 9.0).abs() < 1e-9);

    let transcript = engine.generate_transcript("S1").expect("transcript");
    assert_eq!(transcript.total_credits(), u32::MAX);
    assert_eq!(transcript.graded_credits(), u32::MAX);
    assert_eq!(engine.top_students(1)[0].reg_no, "S1");
}
