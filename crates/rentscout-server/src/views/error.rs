use super::{escape, layout};

pub fn error_page(message: &str) -> String {
    layout(&format!(
        "<h2>An error occurred:</h2>\n<pre><code>{}</code></pre>\n",
        escape(message)
    ))
}
