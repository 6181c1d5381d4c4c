//! Markdown table rendering of student records.
//!
//! Used both for display and as the textual context handed to the completion
//! service, so the column layout is stable.

use crate::student::{QuizScore, StudentRecord, Submission};

pub const COLUMNS: [&str; 8] = [
    "student_id",
    "name",
    "grade",
    "class",
    "region",
    "submissions",
    "quizzes",
    "average_score",
];

/// Render records as a Markdown table (header row always present).
pub fn render_markdown(records: &[StudentRecord]) -> String {
    let mut out = String::new();

    out.push_str("| ");
    out.push_str(&COLUMNS.join(" | "));
    out.push_str(" |\n|");
    for _ in COLUMNS {
        out.push_str("---|");
    }
    out.push('\n');

    for record in records {
        let cells = [
            record.student_id.to_string(),
            record.name.clone(),
            record.grade.clone(),
            record.class.clone(),
            record.region.clone(),
            join_cells(record.submissions.iter().map(format_submission)),
            join_cells(record.quizzes.iter().map(format_quiz)),
            record
                .average_quiz_score()
                .map(|s| format!("{s:.1}"))
                .unwrap_or_default(),
        ];

        out.push_str("| ");
        let escaped: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        out.push_str(&escaped.join(" | "));
        out.push_str(" |\n");
    }

    out
}

fn format_submission(s: &Submission) -> String {
    match s.submitted_at {
        Some(at) => format!("{}: {} ({})", s.assignment, s.status, at.to_rfc3339()),
        None => format!("{}: {}", s.assignment, s.status),
    }
}

fn format_quiz(q: &QuizScore) -> String {
    match q.score {
        Some(score) => format!("{}: {} on {}", q.quiz, score, q.date),
        None => format!("{}: scheduled {}", q.quiz, q.date),
    }
}

fn join_cells(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join("; ")
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::StudentId;
    use crate::student::SubmissionStatus;
    use chrono::NaiveDate;

    fn record(id: u64, name: &str) -> StudentRecord {
        StudentRecord {
            student_id: StudentId::new(id),
            name: name.to_string(),
            grade: "8".to_string(),
            class: "8A".to_string(),
            region: "North".to_string(),
            submissions: vec![Submission {
                assignment: "Homework 1".to_string(),
                status: SubmissionStatus::Pending,
                submitted_at: None,
            }],
            quizzes: vec![
                QuizScore {
                    quiz: "Algebra".to_string(),
                    score: Some(70.0),
                    date: NaiveDate::from_ymd_opt(2025, 7, 8).unwrap(),
                },
                QuizScore {
                    quiz: "Science".to_string(),
                    score: None,
                    date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
                },
            ],
        }
    }

    #[test]
    fn empty_input_renders_header_only() {
        let table = render_markdown(&[]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("| student_id | name |"));
    }

    #[test]
    fn renders_one_row_per_record_in_order() {
        let table = render_markdown(&[record(1, "Aarav"), record(2, "Bela")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("| 1 | Aarav | 8 | 8A | North |"));
        assert!(lines[3].starts_with("| 2 | Bela |"));
        assert!(lines[2].contains("Homework 1: pending"));
        assert!(lines[2].contains("Algebra: 70 on 2025-07-08"));
        assert!(lines[2].contains("Science: scheduled 2025-07-15"));
        assert!(lines[2].ends_with("| 70.0 |"));
    }

    #[test]
    fn pipes_in_values_are_escaped() {
        let table = render_markdown(&[record(1, "A|B")]);
        assert!(table.contains("A\\|B"));
    }
}
