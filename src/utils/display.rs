use colored::*;

const RULE: &str = "========================================";

pub fn print_header(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(text.len()).bright_cyan());
}

/// Headline between two rules, green on success and red on failure.
pub fn print_outcome_banner(headline: &str, success: bool) {
    println!("\n{}", RULE);
    if success {
        println!("{}", headline.green().bold());
    } else {
        println!("{}", headline.red().bold());
    }
    println!("{}", RULE);
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red().bold());
}

/// Run-level notices that are not failures.
pub fn print_notice(text: &str) {
    println!("{}", text.yellow());
}
