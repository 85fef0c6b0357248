use crate::types::dto::items::ItemResponse;

pub const EMPTY_PLACEHOLDER: &str = "<p class=\"empty\">No items yet.</p>";

/// Escape text for safe inclusion in HTML
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One `<li>` per item
///
/// Every user-supplied field is escaped, including the category used as a
/// CSS class.
pub fn render_item(item: &ItemResponse) -> String {
    let category = escape_html(&item.category);
    let location = item
        .location
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(escape_html)
        .unwrap_or_else(|| "—".to_string());

    format!(
        concat!(
            "<li class=\"item\" data-id=\"{id}\">",
            "<div class=\"meta\"><span class=\"badge {category}\">{badge}</span>",
            "<span class=\"title\">{title}</span></div>",
            "<div class=\"desc\">{description}</div>",
            "<div class=\"foot\"><span>Location: {location} • Contact: {contact}</span>",
            "<span>{created_at}</span></div>",
            "</li>"
        ),
        id = escape_html(&item.id),
        badge = category.to_uppercase(),
        category = category,
        title = escape_html(&item.title),
        description = escape_html(&item.description),
        location = location,
        contact = escape_html(&item.contact),
        created_at = item.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

pub fn render_list(items: &[&ItemResponse]) -> String {
    if items.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    items.iter().map(|item| render_item(item)).collect()
}
