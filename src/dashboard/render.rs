//! HTML view of a scan.
//!
//! Pure formatting over the same opportunity list the JSON endpoint serves.
//! Every interpolated string is escaped.

use crate::types::ArbitrageOpportunity;

const STYLE: &str = "body { font-family: Arial; background: #111; color: #0f0; padding: 20px; }\n\
                     .op { border-bottom: 1px solid #0f0; margin-bottom: 12px; padding-bottom: 12px; }";

/// Escape text for an HTML body or attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the auto-refreshing opportunities page.
pub fn render_html(
    opportunities: &[ArbitrageOpportunity],
    checked_at: &str,
    refresh_secs: u64,
) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"{refresh_secs}\">\n\
         <title>Polymarket Arbitrage</title>\n\
         <style>\n{STYLE}\n</style>\n\
         </head>\n<body>\n\
         <h2>🔁 Polymarket Arbitrage Opportunities</h2>\n\
         <p>Last checked: {}</p>\n",
        escape_html(checked_at),
    );

    if opportunities.is_empty() {
        html.push_str("<p><strong>No arbitrage opportunities right now.</strong></p>\n");
    } else {
        for op in opportunities {
            html.push_str(&render_opportunity(op));
        }
    }

    html.push_str(&format!(
        "<p>⏳ Auto-refreshing every {refresh_secs} seconds...</p>\n</body>\n</html>\n"
    ));
    html
}

fn render_opportunity(op: &ArbitrageOpportunity) -> String {
    format!(
        "<div class=\"op\">\n\
         <strong>{question}</strong><br>\n\
         YES: {yes} | NO: {no} | Total: {total}<br>\n\
         Margin: {margin}%<br>\n\
         Urgency: {icon} {urgency}<br>\n\
         Expected Duration: {duration}<br>\n\
         </div>\n",
        question = escape_html(&op.question),
        yes = op.yes_price.normalize(),
        no = op.no_price.normalize(),
        total = op.total.normalize(),
        margin = op.arbitrage_margin.normalize(),
        icon = op.urgency.icon(),
        urgency = op.urgency.label(),
        duration = escape_html(&op.expected_duration),
    )
}
