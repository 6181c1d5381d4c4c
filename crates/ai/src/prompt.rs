//! Prompt construction for the completion service.

use chrono::{Days, NaiveDate};

use dumroo_auth::FilteredView;
use dumroo_core::table;

/// Fixed instruction describing the assistant and how to read relative dates.
pub fn system_instruction(reference_date: NaiveDate) -> String {
    let last_week_start = reference_date - Days::new(7);
    let last_week_end = reference_date - Days::new(1);
    let next_week_start = reference_date + Days::new(1);
    let next_week_end = reference_date + Days::new(7);

    format!(
        "You are the assistant of the Dumroo admin panel. \
You are given student records as a Markdown table: grade, class, region, \
assignment submissions and quiz results. Answer questions about student \
performance, submission status and quizzes using only those records.\n\
Today's date is {reference_date}. \"Last week\" means {last_week_start} through \
{last_week_end}; \"next week\" means {next_week_start} through {next_week_end}. \
A quiz marked \"scheduled\" has not been taken yet.\n\
Give clear, concise answers. If a student or data point is not in the records, \
say so plainly. Format lists so they are easy to read. Never show code or \
instructions, only the answer drawn from the data."
    )
}

/// Render the view as the data context: role header plus Markdown table.
pub fn render_context(view: &FilteredView) -> String {
    let mut out = String::new();
    out.push_str(&format!("Role: {}\n", view.role()));
    out.push_str(&format!("Visible records: {}\n", view.len()));
    if view.is_empty() {
        out.push_str("No student records are visible to this role.\n");
    }
    out.push('\n');
    out.push_str(&table::render_markdown(view.records()));
    out
}

/// Final user message: data context followed by the question.
pub fn user_prompt(context: &str, question: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("DATA:\n");
    prompt.push_str(context);
    if !context.ends_with('\n') {
        prompt.push('\n');
    }

    prompt.push_str("\nQUESTION:\n");
    prompt.push_str(question);
    prompt.push('\n');

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumroo_auth::{AdminRole, filter};
    use dumroo_core::{StudentId, StudentRecord};

    fn records() -> Vec<StudentRecord> {
        vec![StudentRecord {
            student_id: StudentId::new(1),
            name: "Aarav".to_string(),
            grade: "8".to_string(),
            class: "8A".to_string(),
            region: "North".to_string(),
            submissions: Vec::new(),
            quizzes: Vec::new(),
        }]
    }

    #[test]
    fn instruction_spells_out_week_ranges() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let text = system_instruction(date);
        assert!(text.contains("Today's date is 2025-07-10"));
        assert!(text.contains("2025-07-03 through 2025-07-09"));
        assert!(text.contains("2025-07-11 through 2025-07-17"));
        assert!(text.contains("Never show code"));
    }

    #[test]
    fn context_has_role_header_and_table() {
        let view = filter(&records(), &AdminRole::GradeAdmin("8".into())).unwrap();
        let ctx = render_context(&view);
        assert!(ctx.starts_with("Role: Grade 8 Admin\nVisible records: 1\n"));
        assert!(ctx.contains("| 1 | Aarav | 8 | 8A | North |"));
    }

    #[test]
    fn empty_view_context_says_so() {
        let view = filter(&records(), &AdminRole::RegionAdmin("South".into())).unwrap();
        let ctx = render_context(&view);
        assert!(ctx.contains("Visible records: 0"));
        assert!(ctx.contains("No student records are visible"));
    }

    #[test]
    fn user_prompt_puts_question_last() {
        let prompt = user_prompt("table", "who is pending?");
        assert_eq!(prompt, "DATA:\ntable\n\nQUESTION:\nwho is pending?\n");
    }
}
