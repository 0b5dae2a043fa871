//! Prompt templates for the research agents

use super::ticker::Ticker;

pub const NEWS_RESEARCHER: &str = "news-researcher";
pub const RATINGS_RESEARCHER: &str = "ratings-researcher";

/// Sections every report must contain, in order.
pub const REPORT_SECTIONS: [&str; 7] = [
    "Executive Summary",
    "Analyst Ratings & Price Targets",
    "Recent News & Developments",
    "Sentiment Analysis",
    "Risk Factors",
    "Investment Outlook",
    "Disclaimer",
];

pub const NEWS_RESEARCHER_DESCRIPTION: &str =
    "Researches recent news and developments for a stock ticker. Use this agent to find \
     breaking news, earnings reports, product launches, regulatory actions, and other recent events.";

pub const RATINGS_RESEARCHER_DESCRIPTION: &str =
    "Researches analyst ratings, price targets, and market sentiment for a stock ticker. Use this \
     agent to find Wall Street consensus, buy/sell ratings, and sentiment indicators.";

fn section_list() -> String {
    REPORT_SECTIONS
        .iter()
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bash invocation the agent uses to write the report.
fn save_command(ticker: &Ticker) -> String {
    format!(
        "bash -c 'cat > ./{} << \"REPORT_EOF\"\n<report content>\nREPORT_EOF'",
        ticker.report_file_name()
    )
}

pub fn single_agent_system_prompt(ticker: &Ticker, max_searches: u32) -> String {
    format!(
        "You are an investment research analyst. Your job is to research the stock ticker {ticker} \
and produce a comprehensive Markdown investment research report.

Follow these steps:

1. Use WebSearch (max {max_searches} searches) to gather: analyst ratings, price targets, recent news, and market sentiment for {ticker}.
2. Synthesize your findings into a comprehensive report.
3. Use the Bash tool to save the report: {save}

The report must include these sections:
{sections}

Be concise and efficient. Do not use more than {max_searches} WebSearch calls.",
        ticker = ticker,
        max_searches = max_searches,
        save = save_command(ticker),
        sections = section_list(),
    )
}

pub fn orchestrator_system_prompt(ticker: &Ticker) -> String {
    format!(
        "You are a lead investment research analyst coordinating a team of specialists to produce \
a comprehensive research report on {ticker}.

Your workflow:
1. Dispatch the \"{news}\" agent to find recent news and developments for {ticker}.
2. Dispatch the \"{ratings}\" agent to find analyst ratings, price targets, and market sentiment for {ticker}.
3. Once both agents return their findings, synthesize everything into a comprehensive Markdown report.
4. Save the report using Bash: {save}

The final report must include:
{sections}

Dispatch both researcher agents in parallel for speed.",
        ticker = ticker,
        news = NEWS_RESEARCHER,
        ratings = RATINGS_RESEARCHER,
        save = save_command(ticker),
        sections = section_list(),
    )
}

pub fn news_researcher_prompt(max_searches: u32) -> String {
    format!(
        "You are a financial news researcher. Given a stock ticker, search the web for the most \
recent and relevant news.

Focus on:
- Earnings reports and financial results
- Product launches or strategic announcements
- Regulatory or legal developments
- Management changes
- Market-moving events

Use up to {} WebSearch calls. Return a concise bullet-point summary of your findings.",
        max_searches
    )
}

pub fn ratings_researcher_prompt(max_searches: u32) -> String {
    format!(
        "You are a financial analyst ratings researcher. Given a stock ticker, search the web for \
current analyst ratings and market sentiment.

Focus on:
- Consensus analyst rating (buy/hold/sell)
- Price targets (low, average, high)
- Recent rating changes or upgrades/downgrades
- Institutional sentiment and fund flows
- Short interest or other sentiment indicators

Use up to {} WebSearch calls. Return a concise bullet-point summary of your findings.",
        max_searches
    )
}

pub fn single_agent_task(ticker: &Ticker) -> String {
    format!(
        "Research {} and save a Markdown investment report to the file ./{} in the current working directory.",
        ticker,
        ticker.report_file_name()
    )
}

pub fn multi_agent_task(ticker: &Ticker) -> String {
    format!(
        "Research {} and save a Markdown investment report to ./{}",
        ticker,
        ticker.report_file_name()
    )
}
