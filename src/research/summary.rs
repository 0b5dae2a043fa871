use crate::core::messages::ResultMessage;
use crate::utils;

pub fn headline(result: &ResultMessage) -> String {
    let secs = result.duration_secs();
    if result.is_error {
        format!("Research FAILED after {:.1}s", secs)
    } else {
        format!("Research complete in {:.1}s", secs)
    }
}

/// Turn, cost and token counts closing the summary.
pub fn counters(result: &ResultMessage) -> Vec<String> {
    vec![
        format!("Turns: {}", result.num_turns),
        format!("Cost: ${:.4}", result.total_cost_usd),
        format!(
            "Tokens: {} in / {} out",
            result.usage.input_tokens, result.usage.output_tokens
        ),
    ]
}

pub fn errors_line(result: &ResultMessage) -> Option<String> {
    result
        .errors
        .as_ref()
        .map(|errors| format!("Errors: {:?}", errors))
}

pub fn print(result: &ResultMessage) {
    utils::print_outcome_banner(&headline(result), !result.is_error);

    if let Some(ref text) = result.result {
        println!("{}", text);
    }
    if let Some(line) = errors_line(result) {
        utils::print_error(&line);
    }
    for line in counters(result) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(is_error: bool) -> ResultMessage {
        let subtype = if is_error { "error_during_execution" } else { "success" };
        let text = if is_error { None } else { Some("Report saved") };

        serde_json::from_value(serde_json::json!({
            "type": "result",
            "subtype": subtype,
            "is_error": is_error,
            "duration_ms": 12345,
            "num_turns": 7,
            "total_cost_usd": 0.01234,
            "usage": {"input_tokens": 1500, "output_tokens": 320},
            "result": text,
        }))
        .unwrap()
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline(&result(false)), "Research complete in 12.3s");
        assert_eq!(headline(&result(true)), "Research FAILED after 12.3s");
    }

    #[test]
    fn test_counters() {
        assert_eq!(
            counters(&result(false)),
            vec!["Turns: 7", "Cost: $0.0123", "Tokens: 1500 in / 320 out"]
        );
    }

    #[test]
    fn test_errors_line_only_when_errors_present() {
        assert_eq!(errors_line(&result(false)), None);

        let mut failed = result(true);
        failed.errors = Some(vec!["Reached maximum number of turns".to_string()]);
        assert_eq!(
            errors_line(&failed).as_deref(),
            Some("Errors: [\"Reached maximum number of turns\"]")
        );
    }
}
