use super::layout;

/// Landing page with the listing-URL form and the free-text address form.
pub fn search_page() -> String {
    layout(
        "<form method=\"get\" action=\"/ad\">\n\
<label>Jinka ad link: <input type=\"search\" name=\"q\" required></label>\n\
<button type=\"submit\">Search</button>\n\
</form>\n\
<p>OR</p>\n\
<form method=\"get\" action=\"/address\">\n\
<label>Search by address: <input type=\"search\" name=\"q\" required></label>\n\
<button type=\"submit\">Search</button>\n\
</form>\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_forms_submit_q() {
        let html = search_page();
        assert!(html.contains("action=\"/ad\""));
        assert!(html.contains("action=\"/address\""));
        assert_eq!(html.matches("name=\"q\"").count(), 2);
    }
}
