use serde_json::Value;

// @module: HTML fragment builders for the episode web page

/// Content-head div, optionally carrying the topic comments.
pub fn create_header_html(comments: Option<&str>) -> String {
    let mut result = String::from("<div class=\"content-head\">\n");
    if let Some(comments) = comments {
        result.push_str(&format!("<p class=\"comments\">{}</p>", comments));
    }
    result.push_str("</div>");
    result
}

/// Reference-link list div.
pub fn create_references_html(references: &serde_json::Map<String, Value>) -> String {
    let mut result = String::from("<div class=\"references\">\n<ul class=\"list_test-wrap\">\n");
    for (text, link) in references {
        let link = link.as_str().unwrap_or_default();
        result.push_str(&format!(
            "<li class=\"list_test\"><a href=\"{}\">{}</a></li>\n",
            link, text
        ));
    }
    result.push_str("</ul>\n</div>");
    result
}

/// Heading above the related-episodes list.
pub fn related_episodes_header() -> &'static str {
    "<h3>関連エピソード</h3>"
}

/// Related-episodes list from pre-rendered `<li>` links.
pub fn related_episodes_list(links: &[String]) -> String {
    format!("<ul>\n{}\n</ul>", links.join("\n"))
}
