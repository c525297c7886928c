//! History page rendering

use chrono::{DateTime, TimeZone};
use stratus_navigation::{group_by_day, VisitRecord};

pub const HISTORY_PAGE_TITLE: &str = "History";

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render newest-first records as an HTML page grouped by day
pub fn render_history_page<Tz: TimeZone>(records: &[VisitRecord], now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>");
    out.push_str(HISTORY_PAGE_TITLE);
    out.push_str("</title>\n</head>\n<body>\n<h1>");
    out.push_str(HISTORY_PAGE_TITLE);
    out.push_str("</h1>\n");

    if records.is_empty() {
        out.push_str("<p>No history yet.</p>\n");
    }

    let tz = now.timezone();
    for group in group_by_day(records, now) {
        out.push_str("<h2>");
        out.push_str(&escape_html(&group.label));
        out.push_str("</h2>\n<ul>\n");

        for record in &group.records {
            let time = record.timestamp.with_timezone(&tz).format("%H:%M");
            out.push_str(&format!(
                "<li><span class=\"time\">{}</span> <a href=\"{}\">{}</a></li>\n",
                time,
                escape_html(&record.url),
                escape_html(&record.label()),
            ));
        }

        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(url: &str, title: &str, day: u32, hour: u32) -> VisitRecord {
        VisitRecord {
            url: url.to_string(),
            title: title.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, hour, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_groups_by_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();
        let records = vec![
            record("https://openai.com", "https://openai.com", 15, 9),
            record("https://www.google.com/search?q=cats", "cats - Google Search", 14, 8),
        ];

        let html = render_history_page(&records, &now);
        let today = html.find("<h2>Today</h2>").unwrap();
        let yesterday = html.find("<h2>Yesterday</h2>").unwrap();
        assert!(today < yesterday);
        assert!(html.contains("Visited openai.com"));
        assert!(html.contains("Searched for: cats"));
        assert!(html.contains("<span class=\"time\">09:30</span>"));
    }

    #[test]
    fn test_escapes_markup() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();
        let records = vec![record("https://x.com/?a=1&b=2", "<script>", 15, 9)];

        let html = render_history_page(&records, &now);
        assert!(html.contains("href=\"https://x.com/?a=1&amp;b=2\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_history() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();
        let html = render_history_page(&[], &now);
        assert!(html.contains("No history yet."));
        assert!(!html.contains("<h2>"));
    }
}
