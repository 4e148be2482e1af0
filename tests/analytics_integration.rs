use gradebook::analytics::{count_students_with_subject, subject_average};
use gradebook::{
    class_statistics, gpa_range, rank_by_gpa, students_with_grade, subject_statistics, GpaBand,
    LetterGrade, RecordStore,
};
use pretty_assertions::assert_eq;

/// Four students whose GPAs order as 2nd, 1st (tied), 1st (tied), 4th
fn tied_class() -> RecordStore {
    let mut store = RecordStore::default();
    for (id, score) in [(1, 66.0), (2, 88.0), (3, 88.0), (4, 44.0)] {
        store.add(id, &format!("Student {}", id), "CS", "2024-03-01").unwrap();
        store.record_mut(id).unwrap().add_grade("Programming", score, 3).unwrap();
    }
    store
}

#[test]
fn test_competition_ranking_with_ties() {
    let store = tied_class();
    let ranked = rank_by_gpa(&store);

    let mut by_id: Vec<(i32, usize)> = ranked.iter().map(|r| (r.record.id(), r.rank)).collect();
    by_id.sort();
    assert_eq!(by_id, vec![(1, 3), (2, 1), (3, 1), (4, 4)]);

    // The store itself keeps insertion order
    let ids: Vec<i32> = store.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_class_statistics_excludes_ungraded() {
    let mut store = tied_class();
    store.add(5, "Newcomer", "CS", "2024-09-01").unwrap();

    let stats = class_statistics(&store);
    assert_eq!(stats.total_students, 5);
    assert_eq!(stats.graded_students, 4);
    assert!((stats.lowest_gpa.unwrap() - 44.0 * 0.045).abs() < 1e-9);
    assert!((stats.highest_gpa.unwrap() - 88.0 * 0.045).abs() < 1e-9);
    assert_eq!(stats.top_student.unwrap().id(), 2);

    let counted: usize = GpaBand::ALL.iter().map(|b| stats.distribution.count(*b)).sum();
    assert_eq!(counted, 4);
    assert_eq!(stats.distribution.count(GpaBand::Bottom), 1);
    assert_eq!(stats.distribution.count(GpaBand::Upper), 2);
}

#[test]
fn test_class_statistics_of_empty_store() {
    let store = RecordStore::default();
    let stats = class_statistics(&store);
    assert_eq!(stats.average_gpa, None);
    assert!(stats.top_student.is_none());
}

#[test]
fn test_subject_statistics() {
    let mut store = tied_class();
    store.record_mut(1).unwrap().add_grade("Databases", 91.0, 2).unwrap();

    let stats = subject_statistics(&store, "Programming");
    assert_eq!(stats.count, 4);
    assert_eq!(stats.highest_score, Some(88.0));
    assert_eq!(stats.lowest_score, Some(44.0));
    assert_eq!(stats.average_score, Some(71.5));
    assert_eq!(stats.distribution.count(LetterGrade::B), 2);
    assert_eq!(stats.distribution.count(LetterGrade::F), 1);

    assert_eq!(count_students_with_subject(&store, "Databases"), 1);
    assert_eq!(subject_average(&store, "Databases"), 91.0);

    let none = subject_statistics(&store, "Art History");
    assert_eq!(none.count, 0);
    assert_eq!(none.average_score, None);
}

#[test]
fn test_gpa_range_keeps_store_order() {
    let store = tied_class();
    let ids: Vec<i32> = gpa_range(&store, 2.5, 4.5).iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(gpa_range(&store, 4.2, 4.5).is_empty());
}

#[test]
fn test_grade_search_is_exact() {
    let store = tied_class();
    let b_ids: Vec<i32> = students_with_grade(&store, LetterGrade::B)
        .iter()
        .map(|m| m.record.id())
        .collect();
    assert_eq!(b_ids, vec![2, 3]);

    // 66.0 is a D and must not show up when asking for C
    assert!(students_with_grade(&store, LetterGrade::C).is_empty());
}
