/// Tags that become a newline before the remaining markup is dropped.
const LINE_BREAK_TAGS: &[&str] = &["</p>", "<br>", "</br>", "<br/>", "<br />"];

/// Entities flattened to plain ASCII before general entity decoding.
const PLAIN_ENTITIES: &[(&str, &str)] = &[
    ("&#8216;", "'"),
    ("&#8217;", "'"),
    ("&#8220;", "\""),
    ("&#8221;", "\""),
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Reduce Jira's HTML to plain text that is safe to send as Markdown.
///
/// Paragraph ends and `<br>` variants become newlines and every other tag is dropped.
/// Entities are decoded, then `<`, `>` and `&` are escaped again so stray markup can't
/// survive. A bare `& ` is left readable. Running it on its own output is a no-op.
pub fn sanitize_html(input: &str) -> String {
    let mut text = if input.contains(|c: char| c == '<' || c == '>') {
        strip_tags(input)
    } else {
        input.to_string()
    };

    for (entity, plain) in PLAIN_ENTITIES {
        text = text.replace(entity, plain);
    }

    let decoded = html_escape::decode_html_entities(&text);
    html_escape::encode_text(&decoded).replace("&amp; ", "& ")
}

fn strip_tags(input: &str) -> String {
    // Source newlines carry no meaning inside markup; only tags produce line breaks.
    let mut html = input.replace('\n', "");
    for tag in LINE_BREAK_TAGS {
        html = html.replace(tag, "\n");
    }

    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
