use crate::scan::Utility;

/// Fragment emitted when the scan found nothing to list.
pub const NO_UTILITIES_FRAGMENT: &str =
    r#"<div class="no-utilities">No utilities available yet.</div>"#;

/// Escape a value for interpolation into HTML.
///
/// Metadata is arbitrary user input; every interpolated field goes
/// through here.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the utility list fragment.
///
/// Utilities sort by display name, case-insensitively; ties keep scan
/// order (stable sort). `base_url` is trusted configuration prefixed to
/// each card link; empty produces root-relative `/<path>/` links.
pub fn render_utilities(utilities: &[Utility], base_url: &str) -> String {
    if utilities.is_empty() {
        return NO_UTILITIES_FRAGMENT.to_string();
    }

    let mut sorted: Vec<&Utility> = utilities.iter().collect();
    sorted.sort_by_key(|u| u.name.to_lowercase());

    let base = base_url.trim_end_matches('/');

    let cards: Vec<String> = sorted.iter().map(|u| render_card(u, base)).collect();
    cards.join("\n")
}

fn render_card(utility: &Utility, base: &str) -> String {
    format!(
        r#"            <div class="utility-card">
                <h2><a href="{base}/{path}/">{name}</a></h2>
                <p class="utility-description">{description}</p>
                <div class="utility-meta">Last updated: {last_modified}</div>
            </div>"#,
        base = base,
        path = escape_html(&utility.path),
        name = escape_html(&utility.name),
        description = escape_html(&utility.description),
        last_modified = escape_html(&utility.last_modified),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utility(path: &str, name: &str) -> Utility {
        Utility {
            path: path.to_string(),
            name: name.to_string(),
            description: "desc".to_string(),
            last_modified: "2026-08-07".to_string(),
            build: None,
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_utilities(&[], ""), NO_UTILITIES_FRAGMENT);
    }

    #[test]
    fn sorts_case_insensitively() {
        let utilities = vec![
            utility("banana", "Banana"),
            utility("apple", "apple"),
            utility("cherry", "Cherry"),
        ];

        let html = render_utilities(&utilities, "");
        let apple = html.find("apple").unwrap();
        let banana = html.find("Banana").unwrap();
        let cherry = html.find("Cherry").unwrap();
        assert!(apple < banana);
        assert!(banana < cherry);
    }

    #[test]
    fn sort_is_stable_for_equal_names() {
        let mut first = utility("first", "Same");
        first.description = "first of two".to_string();
        let mut second = utility("second", "same");
        second.description = "second of two".to_string();

        let html = render_utilities(&[first, second], "");
        assert!(html.find("first of two").unwrap() < html.find("second of two").unwrap());
    }

    #[test]
    fn card_links_to_utility_path() {
        let html = render_utilities(&[utility("foo", "Foo")], "");
        assert!(html.contains(r#"<a href="/foo/">Foo</a>"#));
        assert!(html.contains("Last updated: 2026-08-07"));
    }

    #[test]
    fn base_url_prefixes_links() {
        let html = render_utilities(&[utility("foo", "Foo")], "https://utils.example.com/");
        assert!(html.contains(r#"<a href="https://utils.example.com/foo/">Foo</a>"#));
    }

    #[test]
    fn fields_are_html_escaped() {
        let mut evil = utility("foo", "<script>alert('x')</script>");
        evil.description = "a & b".to_string();

        let html = render_utilities(&[evil], "");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn cards_joined_with_single_newline() {
        let html = render_utilities(&[utility("a", "A"), utility("b", "B")], "");
        assert_eq!(html.matches("</div>\n            <div").count(), 1);
    }
}
