use std::fmt::Write;

use crate::model::{EvaluationResult, EvaluationState};

pub fn render_state(state: &EvaluationState) -> String {
    match state {
        EvaluationState::Pending => "Researching this company...".to_string(),
        EvaluationState::Failure(message) => {
            format!("{message}\nPlease check the URL and try again.")
        }
        EvaluationState::Success(result) => render_result(result),
    }
}

fn render_result(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", result.display_label());
    let _ = writeln!(out, "{}", result.company_name);
    push_paragraph(&mut out, None, &result.summary);
    push_list(&mut out, "Strengths", '+', &result.strengths);
    push_list(&mut out, "Concerns", '-', &result.concerns);
    push_paragraph(
        &mut out,
        Some("Founder & Leadership Insights"),
        &result.founder_insights,
    );
    push_paragraph(
        &mut out,
        Some("Industry & Market Outlook"),
        &result.space_outlook,
    );
    push_paragraph(&mut out, Some("Bottom Line"), &result.advice);
    out.trim_end().to_string()
}

fn push_paragraph(out: &mut String, heading: Option<&str>, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    out.push('\n');
    if let Some(heading) = heading {
        let _ = writeln!(out, "{heading}");
    }
    let _ = writeln!(out, "{text}");
}

fn push_list(out: &mut String, heading: &str, bullet: char, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for item in items {
        let _ = writeln!(out, "  {bullet} {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_sections_in_page_order() {
        let result = EvaluationResult {
            company_name: "Stripe".to_string(),
            verdict: "worth_joining".to_string(),
            verdict_label: "Worth Joining".to_string(),
            summary: "Payments leader.".to_string(),
            strengths: vec!["Product".to_string(), "Team".to_string()],
            concerns: vec!["Pace".to_string()],
            founder_insights: "Collison brothers.".to_string(),
            space_outlook: "Growing.".to_string(),
            advice: "Apply.".to_string(),
        };
        let rendered = render_state(&EvaluationState::Success(result));
        assert_eq!(
            rendered,
            "[Worth Joining]\nStripe\n\nPayments leader.\n\nStrengths\n  + Product\n  + Team\n\n\
Concerns\n  - Pace\n\nFounder & Leadership Insights\nCollison brothers.\n\n\
Industry & Market Outlook\nGrowing.\n\nBottom Line\nApply."
        );
    }

    #[test]
    fn skips_empty_sections() {
        let result = EvaluationResult {
            company_name: "Acme".to_string(),
            verdict: "red_flags".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_state(&EvaluationState::Success(result)),
            "[Red Flags Detected]\nAcme"
        );
    }

    #[test]
    fn pending_and_failure_states() {
        assert_eq!(
            render_state(&EvaluationState::Pending),
            "Researching this company..."
        );
        assert!(render_state(&EvaluationState::Failure("boom".to_string())).starts_with("boom\n"));
    }
}
