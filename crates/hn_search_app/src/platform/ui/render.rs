use hn_search_core::{AppViewModel, Hit, SortKey};

const TITLE_WIDTH: usize = 44;
const AUTHOR_WIDTH: usize = 16;
const NUMBER_WIDTH: usize = 9;
const URL_INDENT: &str = "    ";

/// Renders the whole screen for one view snapshot.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let status = match (&view.search_key, view.page) {
        (Some(key), Some(page)) => format!(
            "Search: [{}]  showing \"{}\" ({} results, page {})",
            view.search_text,
            key,
            view.list.len(),
            page
        ),
        (Some(key), None) => format!("Search: [{}]  showing \"{}\"", view.search_text, key),
        (None, _) => format!("Search: [{}]", view.search_text),
    };
    lines.push(status);
    lines.push(String::new());

    if view.shows_results() {
        lines.push(header(view.sort_key, view.is_sort_reverse));
        for hit in &view.list {
            lines.push(row(hit));
            // Ask HN and similar posts have no link.
            if !hit.url.is_empty() {
                lines.push(format!("{URL_INDENT}{}", hit.url));
            }
        }
    } else {
        lines.push("Oops...".to_string());
        if let Some(error) = &view.error {
            lines.push(format!("({error})"));
        }
    }

    lines.push(String::new());
    if view.is_loading {
        lines.push("Loading ...".to_string());
    } else if view.can_request_more {
        lines.push("/more for more results, /help for commands".to_string());
    }

    lines
}

fn header(active: SortKey, is_sort_reverse: bool) -> String {
    let label = |key: SortKey, text: &str| -> String {
        if key != active {
            return text.to_string();
        }
        let marker = if is_sort_reverse { '^' } else { '*' };
        format!("{text}{marker}")
    };

    format!(
        "{:<tw$} {:<aw$} {:>nw$} {:>nw$}  Id",
        label(SortKey::Title, "Title"),
        label(SortKey::Author, "Author"),
        label(SortKey::Comments, "Comments"),
        label(SortKey::Points, "Points"),
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH,
        nw = NUMBER_WIDTH,
    )
}

fn row(hit: &Hit) -> String {
    format!(
        "{:<tw$} {:<aw$} {:>nw$} {:>nw$}  {}",
        truncate(&hit.title, TITLE_WIDTH),
        truncate(&hit.author, AUTHOR_WIDTH),
        hit.num_comments,
        hit.points,
        hit.object_id,
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH,
        nw = NUMBER_WIDTH,
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
