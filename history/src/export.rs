use chrono::{DateTime, Utc};

pub const PRODUCT_NAME: &str = "Lavender Lab";

const RULE: &str = "========================================";

/// Render ideas as a plain-text document with one numbered section each.
///
/// Idea text is written unmodified. This has no effect on the stored history.
pub fn export_document(category: &str, entries: &[String], timestamp: DateTime<Utc>) -> String {
    let mut doc = String::new();
    doc.push_str(&format!("{} - Saved Ideas\n", PRODUCT_NAME));
    doc.push_str(&format!("Category: {}\n", category));
    doc.push_str(&format!(
        "Exported: {}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    doc.push_str(&format!("Total ideas: {}\n", entries.len()));
    doc.push_str(RULE);
    doc.push('\n');

    for (i, entry) in entries.iter().enumerate() {
        doc.push_str(&format!("\n## Idea {}\n\n", i + 1));
        doc.push_str(entry);
        doc.push('\n');
    }

    doc
}

/// Suggested download name, e.g. `lavender-lab-youtube-20261014-093000.txt`
pub fn export_file_name(category: &str, timestamp: DateTime<Utc>) -> String {
    let slug: String = category
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "ideas".to_string() } else { slug };

    format!(
        "lavender-lab-{}-{}.txt",
        slug,
        timestamp.format("%Y%m%d-%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_two_numbered_sections() {
        let entries = vec!["X".to_string(), "Y".to_string()];
        let doc = export_document("YouTube", &entries, at());

        let headings: Vec<&str> = doc.lines().filter(|l| l.starts_with("## Idea ")).collect();
        assert_eq!(headings, vec!["## Idea 1", "## Idea 2"]);

        let x = doc.find("\nX\n").unwrap();
        let y = doc.find("\nY\n").unwrap();
        assert!(x < y);
    }

    #[test]
    fn test_header() {
        let doc = export_document("Instagram", &[], at());
        assert!(doc.starts_with("Lavender Lab - Saved Ideas\n"));
        assert!(doc.contains("Category: Instagram\n"));
        assert!(doc.contains("Exported: 2026-10-14 09:30:00 UTC\n"));
        assert!(doc.contains("Total ideas: 0\n"));
        assert!(!doc.contains("## Idea"));
    }

    #[test]
    fn test_entry_text_is_unmodified() {
        let idea = "**Title**: 5 Morning Habits\n  indented line\n#habits #morning".to_string();
        let doc = export_document("YouTube", std::slice::from_ref(&idea), at());
        assert!(doc.contains(&format!("## Idea 1\n\n{}\n", idea)));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            export_file_name("YouTube", at()),
            "lavender-lab-youtube-20261014-093000.txt"
        );
        assert_eq!(
            export_file_name("Blog Articles!", at()),
            "lavender-lab-blog-articles-20261014-093000.txt"
        );
        assert_eq!(
            export_file_name("???", at()),
            "lavender-lab-ideas-20261014-093000.txt"
        );
    }
}
