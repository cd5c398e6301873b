//! Directory listing module
//!
//! Renders the HTML index shown for directories that have no index file.
//! Directory entries get a trailing slash and everything is sorted by
//! name.

use std::io;
use std::path::Path;

use tokio::fs;

/// Read `dir` and render its listing page.
///
/// `request_path` is the URI path the client asked for; it appears in
/// the title and is the base of every link.
pub async fn render_directory(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    Ok(render_page(request_path, &names))
}

/// Render the listing HTML for pre-collected entry names.
fn render_page(request_path: &str, names: &[String]) -> String {
    let base = if request_path.ends_with('/') {
        request_path.to_string()
    } else {
        format!("{request_path}/")
    };

    let items = names
        .iter()
        .map(|name| format!("<li><a href=\"{base}{name}\">{name}</a></li>"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head><meta charset=\"utf-8\"><title>Directory listing for {path}</title></head>\n",
            "<body>\n",
            "<h1>Directory listing for {path}</h1>\n",
            "<hr>\n",
            "<ul>\n",
            "{items}\n",
            "</ul>\n",
            "<hr>\n",
            "</body>\n",
            "</html>\n",
        ),
        path = request_path,
        items = items,
    )
}
