//! Meeting persistence.
//!
//! A single SQLite table of `(id, title, time)` rows. Titles and times are
//! free text stored verbatim; either may be absent.

mod sqlite;

pub use sqlite::MeetingStore;

/// A stored meeting row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    /// Store-assigned row id.
    pub id: i64,
    pub title: Option<String>,
    pub time: Option<String>,
}

impl Meeting {
    /// Confirmation line for a freshly saved meeting.
    pub fn confirmation(&self) -> String {
        format!(
            "Meeting '{}' successfully saved to the database for {}.",
            plain(&self.title),
            plain(&self.time)
        )
    }

    /// Row rendered as a tuple, e.g. `(1, 'Standup', '9am')`.
    fn as_tuple(&self) -> String {
        format!("({}, {}, {})", self.id, quoted(&self.title), quoted(&self.time))
    }
}

/// Render the full table listing handed back to the model.
pub fn format_listing(meetings: &[Meeting]) -> String {
    let rows = meetings
        .iter()
        .map(Meeting::as_tuple)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Meetings in Database: [{}]", rows)
}

fn plain(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

fn quoted(value: &Option<String>) -> String {
    let Some(v) = value else {
        return "None".to_string();
    };

    let quote = if v.contains('\'') && !v.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(v.len() + 2);
    out.push(quote);
    for c in v.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() && (c as u32) < 0x100 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(id: i64, title: Option<&str>, time: Option<&str>) -> Meeting {
        Meeting {
            id,
            title: title.map(str::to_string),
            time: time.map(str::to_string),
        }
    }

    #[test]
    fn test_confirmation() {
        let m = meeting(1, Some("Standup"), Some("tomorrow 9am"));
        assert_eq!(
            m.confirmation(),
            "Meeting 'Standup' successfully saved to the database for tomorrow 9am."
        );
        assert_eq!(
            meeting(2, None, None).confirmation(),
            "Meeting 'None' successfully saved to the database for None."
        );
    }

    #[test]
    fn test_format_listing() {
        assert_eq!(format_listing(&[]), "Meetings in Database: []");

        let rows = vec![
            meeting(1, Some("Standup"), Some("9am")),
            meeting(2, None, None),
            meeting(3, Some("Bob's review"), Some("5pm")),
        ];
        assert_eq!(
            format_listing(&rows),
            "Meetings in Database: [(1, 'Standup', '9am'), (2, None, None), (3, \"Bob's review\", '5pm')]"
        );
    }

    #[test]
    fn test_listing_escapes_like_repr() {
        let rows = vec![
            meeting(1, Some("a\\b"), Some("line1\nline2\ttab\r")),
            meeting(2, Some("it's \"quoted\""), Some("bell\u{7}")),
        ];
        assert_eq!(
            format_listing(&rows),
            r#"Meetings in Database: [(1, 'a\\b', 'line1\nline2\ttab\r'), (2, 'it\'s "quoted"', 'bell\x07')]"#
        );
    }
}
