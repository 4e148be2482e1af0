use gradebook::{
    weighted_gpa, ErrorKind, GradebookError, InfoUpdate, LetterGrade, RecordStore, MAX_SUBJECTS,
};
use pretty_assertions::assert_eq;

fn store_with_students() -> RecordStore {
    let mut store = RecordStore::with_capacity(5).unwrap();
    store.add(2024001, "Kim Minji", "Computer Science", "2024-03-01").unwrap();
    store.add(2024002, "Lee Junho", "Physics", "2024-03-01").unwrap();
    store.add(2024003, "Park Seoyeon", "Mathematics", "2024-03-02").unwrap();
    store
}

#[test]
fn test_add_then_find_returns_matching_identity() {
    let store = store_with_students();
    let record = store.find_by_id(2024002).unwrap();

    assert_eq!(record.identity().name(), "Lee Junho");
    assert_eq!(record.identity().major(), "Physics");
    assert_eq!(record.identity().registration_date(), "2024-03-01");
    assert_eq!(record.gpa(), 0.0);
}

#[test]
fn test_duplicate_id_does_not_grow_store() {
    let mut store = store_with_students();
    let err = store.add(2024001, "Someone", "Art", "2024-03-05").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateId);
    assert_eq!(store.len(), 3);
    assert_eq!(store.find_by_id(2024001).unwrap().name(), "Kim Minji");
}

#[test]
fn test_capacity_checked_before_duplicates() {
    let mut store = RecordStore::with_capacity(1).unwrap();
    store.add(1, "A", "X", "2024-01-01").unwrap();

    let err = store.add(1, "A", "X", "2024-01-01").unwrap_err();
    assert!(matches!(err, GradebookError::CapacityExceeded { capacity: 1 }));
}

#[test]
fn test_delete_keeps_order() {
    let mut store = store_with_students();
    store.delete(2024002).unwrap();

    let ids: Vec<i32> = store.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![2024001, 2024003]);
    assert_eq!(store.delete(2024002).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_update_info_ignores_empty_fields() {
    let mut store = store_with_students();
    store
        .update_info(2024003, InfoUpdate::default().name("").major("Statistics"))
        .unwrap();

    let record = store.find_by_id(2024003).unwrap();
    assert_eq!(record.name(), "Park Seoyeon");
    assert_eq!(record.identity().major(), "Statistics");
}

#[test]
fn test_add_then_delete_grade_restores_gpa() {
    let mut store = store_with_students();
    let record = store.record_mut(2024001).unwrap();
    record.add_grade("Data Structures", 88.5, 3).unwrap();
    record.add_grade("Linear Algebra", 72.0, 2).unwrap();
    let before = record.gpa();

    record.add_grade("Operating Systems", 61.0, 4).unwrap();
    assert!(record.gpa() < before);

    record.delete_grade("Operating Systems").unwrap();
    assert!((record.gpa() - before).abs() < 1e-12);
}

#[test]
fn test_gpa_matches_weighted_formula_after_every_mutation() {
    let mut store = store_with_students();
    let record = store.record_mut(2024002).unwrap();

    record.add_grade("Mechanics", 100.0, 1).unwrap();
    record.add_grade("Optics", 0.0, 1).unwrap();
    assert!((record.gpa() - 2.25).abs() < 1e-12);

    record.update_grade("Optics", 80.0).unwrap();
    let expected = weighted_gpa(record.grades().iter().map(|g| (g.score(), g.credit())));
    assert_eq!(record.gpa(), expected);
    assert_eq!(record.find_grade("Optics").unwrap().letter(), LetterGrade::B);
}

#[test]
fn test_failed_grade_operations_leave_record_unchanged() {
    let mut store = store_with_students();
    let record = store.record_mut(2024003).unwrap();
    record.add_grade("Topology", 93.0, 3).unwrap();
    let snapshot = record.clone();

    assert_eq!(
        record.add_grade("Topology", 50.0, 3).unwrap_err().kind(),
        ErrorKind::DuplicateSubject
    );
    assert_eq!(
        record.add_grade("Analysis", 100.5, 3).unwrap_err().kind(),
        ErrorKind::InvalidScore
    );
    assert_eq!(
        record.add_grade("Analysis", 70.0, 0).unwrap_err().kind(),
        ErrorKind::InvalidCredit
    );
    assert_eq!(
        record.update_grade("Topology", -1.0).unwrap_err().kind(),
        ErrorKind::InvalidScore
    );
    assert_eq!(
        record.delete_grade("Analysis").unwrap_err().kind(),
        ErrorKind::NotFound
    );

    assert_eq!(*record, snapshot);
}

#[test]
fn test_subject_limit() {
    let mut store = store_with_students();
    let record = store.record_mut(2024001).unwrap();
    for i in 0..MAX_SUBJECTS {
        record.add_grade(&format!("Course {}", i), 75.0, 2).unwrap();
    }

    let err = record.add_grade("One More", 75.0, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooManySubjects);
    assert_eq!(record.subject_count(), MAX_SUBJECTS);
    assert_eq!(record.total_credits(), 2 * MAX_SUBJECTS as i32);
}

#[test]
fn test_find_by_name_returns_first_match() {
    let mut store = store_with_students();
    store.add(2024004, "Kim Minji", "Biology", "2024-03-04").unwrap();

    assert_eq!(store.find_by_name("Kim Minji").unwrap().id(), 2024001);
    assert!(store.find_by_name("kim minji").is_none());
}

#[test]
fn test_sort_helpers_reorder_store() {
    let mut store = store_with_students();
    store.record_mut(2024003).unwrap().add_grade("Topology", 95.0, 3).unwrap();
    store.record_mut(2024001).unwrap().add_grade("Compilers", 65.0, 3).unwrap();

    store.sort_by_gpa();
    let ids: Vec<i32> = store.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![2024003, 2024001, 2024002]);

    store.sort_by_id();
    let ids: Vec<i32> = store.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![2024001, 2024002, 2024003]);
}
