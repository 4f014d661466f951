use chrono::NaiveDate;

use super::types::RsvpResponse;

const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Attending",
    "Guests",
    "Drinks",
    "Wish",
    "Comment",
    "Submitted at",
];

/// Quote a CSV cell, doubling embedded quotes.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Render responses as CSV with a UTF-8 BOM so spreadsheet tools pick the
/// right encoding. Every cell is quoted; rows are `\n`-separated.
pub fn rsvp_csv(responses: &[RsvpResponse]) -> String {
    let mut lines = Vec::with_capacity(responses.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for r in responses {
        let guests = r.guests_count.to_string();
        let drinks = r.selected_drinks.join("; ");
        let cells = [
            r.name.as_str(),
            if r.attending { "Yes" } else { "No" },
            guests.as_str(),
            drinks.as_str(),
            r.wish.as_str(),
            r.comment.as_str(),
            r.submitted_at.as_str(),
        ];
        lines.push(cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));
    }

    format!("\u{feff}{}", lines.join("\n"))
}

/// `rsvp-YYYY-MM-DD.csv`
pub fn rsvp_csv_filename(date: NaiveDate) -> String {
    format!("rsvp-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_bom_header_and_quoted_rows() {
        let responses = vec![RsvpResponse {
            id: "1".into(),
            name: "Anna \"Annie\" K".into(),
            attending: true,
            guests_count: 2,
            comment: "line, with comma".into(),
            selected_drinks: vec!["Wine".into(), "Juice".into()],
            wish: String::new(),
            submitted_at: "2026-07-01T10:00:00.000Z".into(),
        }];
        let csv = rsvp_csv(&responses);
        assert!(csv.starts_with('\u{feff}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines[0], "Name,Attending,Guests,Drinks,Wish,Comment,Submitted at");
        assert_eq!(
            lines[1],
            r#""Anna ""Annie"" K","Yes","2","Wine; Juice","","line, with comma","2026-07-01T10:00:00.000Z""#
        );
    }

    #[test]
    fn empty_export_is_header_only() {
        let csv = rsvp_csv(&[]);
        assert_eq!(csv.trim_start_matches('\u{feff}').lines().count(), 1);
    }

    #[test]
    fn filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 16).unwrap();
        assert_eq!(rsvp_csv_filename(date), "rsvp-2026-07-16.csv");
    }
}
