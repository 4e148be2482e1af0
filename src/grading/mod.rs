//! Grade rules and per-record grade operations.
//!
//! - `rules`: score bands, validation and the weighted GPA formula
//! - `book`: add/update/delete/find of a record's subject grades

pub mod book;
pub mod rules;

pub use rules::{
    is_valid_credit, is_valid_score, score_to_grade, weighted_gpa, GPA_SCALE, MAX_GPA,
};
