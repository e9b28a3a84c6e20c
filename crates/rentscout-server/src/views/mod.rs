//! Server-rendered HTML pages.
//!
//! Pages are plain strings. Every value that did not come from this module
//! goes through [`escape`] before interpolation.

mod error;
mod result;
mod search;

pub use error::error_page;
pub use result::result_page;
pub use search::search_page;

const TITLE: &str = "Jinka ad parser";

/// Wraps page content in the shared document shell with the home link.
fn layout(content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{TITLE}</title>\n\
</head>\n\
<body>\n\
<a href=\"/\"><h1>{TITLE}</h1></a>\n\
{content}\
</body>\n\
</html>\n"
    )
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
