//! Server-rendered UI
//!
//! Plain-HTML rendering of the daily focus table: a full page for
//! `GET /` and a standalone fragment for `GET /data`.

use crate::store::{Level, HOURS_PER_DAY};
use chrono::NaiveDate;

/// Render the hourly table for one day as an HTML fragment
pub fn day_table(date: NaiveDate, levels: &[Level; HOURS_PER_DAY]) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<section id=\"focus-data\">\n<h2>Focus on {}</h2>\n",
        date.format("%d.%m.%Y")
    ));
    html.push_str("<table>\n<tr><th>Hour</th><th>Level</th></tr>\n");
    for (hour, level) in levels.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{hour:02}:00</td><td class=\"level-{}\">{level}</td></tr>\n",
            level.ordinal()
        ));
    }
    html.push_str("</table>\n</section>\n");
    html
}

/// Render the full page around a day table
pub fn page(date: NaiveDate, levels: &[Level; HOURS_PER_DAY]) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>focusdb</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 0.2em 0.8em; }}\n\
         .level-0 {{ color: #999; }}\n\
         .level-5 {{ font-weight: bold; }}\n\
         </style>\n\
         </head>\n<body>\n\
         <h1>Focus levels</h1>\n\
         <form action=\"/data\" method=\"get\">\n\
         <input type=\"date\" name=\"date\" value=\"{}\">\n\
         <button type=\"submit\">Show</button>\n\
         </form>\n\
         {}\
         </body>\n</html>\n",
        date.format("%Y-%m-%d"),
        day_table(date, levels)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_table_has_24_rows() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        let mut levels = [Level::None; HOURS_PER_DAY];
        levels[9] = Level::Flow;

        let html = day_table(date, &levels);
        assert_eq!(html.matches("<tr><td>").count(), 24);
        assert!(html.contains("21.01.2025"));
        assert!(html.contains("Flow"));
    }

    #[test]
    fn test_page_wraps_table() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        let levels = [Level::None; HOURS_PER_DAY];

        let html = page(date, &levels);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("focus-data"));
        assert!(html.contains("value=\"2025-01-21\""));
    }
}
