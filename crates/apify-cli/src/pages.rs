//! HTML for the spec index and the Redoc viewer.

use std::fmt::Write;

use apify::SpecSummary;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.10.5/font/bootstrap-icons.css";
const REDOC_BUNDLE: &str = "https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js";

const DESCRIPTION_LIMIT: usize = 180;

const INDEX_STYLE: &str = ".card-title { font-size: 1rem; font-weight:600;} \
.card-text{font-size:.9rem;color:#555} \
.spec-desc{min-height:3.3em; overflow:hidden;} \
.spec-badge{margin-left:0.5rem;} \
.spec-path{font-size:.8rem;color:#6c757d}";

pub fn view_path(id: &str) -> String {
    format!("/api-spec/view/{id}")
}

pub fn content_path(id: &str) -> String {
    format!("/api-spec/content/{id}")
}

/// Card grid of every discovered spec.
pub fn index_page(specs: &[SpecSummary]) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html><html><head>");
    html.push_str(
        "<meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
    );
    let _ = write!(html, "<link href=\"{BOOTSTRAP_CSS}\" rel=\"stylesheet\">");
    let _ = write!(html, "<link href=\"{BOOTSTRAP_ICONS_CSS}\" rel=\"stylesheet\">");
    let _ = write!(html, "<title>APIs</title><style>{INDEX_STYLE}</style>");
    html.push_str("</head><body>");
    html.push_str("<div class=\"container py-4\"><h1 class=\"mb-4\">Available API Specs</h1>");
    html.push_str(
        "<div class=\"row row-cols-1 row-cols-sm-2 row-cols-md-3 row-cols-lg-4 g-4\">",
    );

    for spec in specs {
        push_card(&mut html, spec);
    }

    html.push_str("</div></div></body></html>");
    html
}

fn push_card(html: &mut String, spec: &SpecSummary) {
    let title = escape_html(spec.display_title());
    let description = spec
        .description
        .as_deref()
        .map(|d| escape_html(&truncate(d, DESCRIPTION_LIMIT)))
        .unwrap_or_default();

    html.push_str("<div class=\"col\"><div class=\"card h-100 shadow-sm\">");
    html.push_str("<div class=\"card-body d-flex flex-column\">");
    html.push_str("<div class=\"d-flex align-items-start\">");
    html.push_str("<i class=\"bi bi-file-earmark-code fs-2 me-3 text-primary\"></i>");
    html.push_str("<div class=\"flex-grow-1\">");
    let _ = write!(
        html,
        "<h5 class=\"card-title\">{title}<span class=\"badge bg-secondary spec-badge\">{}</span></h5>",
        spec.format
    );
    if !spec.location.is_empty() {
        let _ = write!(
            html,
            "<div class=\"spec-path\">{}</div>",
            escape_html(&spec.location)
        );
    }
    let _ = write!(html, "<div class=\"card-text spec-desc\">{description}</div>");
    html.push_str("</div></div>");
    html.push_str("<div class=\"mt-3 d-flex gap-2\">");
    let _ = write!(
        html,
        "<a class=\"btn btn-sm btn-outline-primary\" href=\"{}\">Open</a>",
        view_path(&spec.id)
    );
    let _ = write!(
        html,
        "<a class=\"btn btn-sm btn-outline-secondary\" href=\"{}\">Raw</a>",
        content_path(&spec.id)
    );
    let _ = write!(
        html,
        "<div class=\"ms-auto text-muted small\">{}</div>",
        human_size(spec.size_bytes)
    );
    html.push_str("</div></div></div></div>");
}

/// Full-window Redoc viewer that loads the spec from the content route.
pub fn viewer_page(display_name: &str, id: &str) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html><html><head>");
    html.push_str(
        "<meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
    );
    let _ = write!(html, "<link href=\"{BOOTSTRAP_CSS}\" rel=\"stylesheet\">");
    let _ = write!(html, "<title>{}</title>", escape_html(display_name));
    html.push_str("</head><body style=\"margin:0;\">");
    html.push_str("<div class=\"d-flex\" style=\"height:100vh; width:100vw\">");
    let _ = write!(
        html,
        "<div style=\"flex:1;\"><redoc spec-url=\"{}\"></redoc></div>",
        content_path(id)
    );
    html.push_str("</div>");
    let _ = write!(html, "<script src=\"{REDOC_BUNDLE}\"></script>");
    html.push_str("</body></html>");
    html
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Cuts `input` to at most `limit` characters, ending in `…` when shortened.
pub fn truncate(input: &str, limit: usize) -> String {
    if input.chars().count() <= limit {
        return input.to_string();
    }
    let mut out: String = input.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Binary-prefixed size: `512 B`, `1.5 KB`, `3.0 MB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut exp = 0;
    let mut threshold = 1024u64;
    while exp + 1 < UNITS.len() && bytes / threshold >= 1024 {
        threshold *= 1024;
        exp += 1;
    }
    format!("{:.1} {}B", bytes as f64 / threshold as f64, UNITS[exp])
}
