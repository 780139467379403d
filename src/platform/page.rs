//! Watch page node extraction

use crate::error::TubeError;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static PUBLISH_DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong.watch-time-text").expect("valid date selector"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p#eow-description").expect("valid description selector"));

/// Publish date and description text of a watch page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescription {
    pub date: String,
    pub description: String,
}

/// Pull the publish-date and description nodes out of a watch page
pub fn extract_description(html: &str) -> Result<PageDescription, TubeError> {
    let document = Html::parse_document(html);

    let date = document
        .select(&PUBLISH_DATE)
        .next()
        .map(node_text)
        .ok_or(TubeError::MissingPageNode("publish date"))?;
    let description = document
        .select(&DESCRIPTION)
        .next()
        .map(node_text)
        .ok_or(TubeError::MissingPageNode("description"))?;

    Ok(PageDescription { date, description })
}

fn node_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_description() {
        let html = r#"
            <div id="watch-uploader-info">
              <strong class="watch-time-text">Published on Jan 1</strong>
            </div>
            <div id="watch-description-text">
              <p id="eow-description">A video <a href="/x">with a link</a>.</p>
            </div>
        "#;

        let page = extract_description(html).unwrap();
        assert_eq!(page.date, "Published on Jan 1");
        assert_eq!(page.description, "A video with a link.");
    }

    #[test]
    fn test_missing_nodes() {
        let no_date = r#"<p id="eow-description">text</p>"#;
        assert!(matches!(
            extract_description(no_date),
            Err(TubeError::MissingPageNode("publish date"))
        ));

        let no_description = r#"<strong class="watch-time-text">d</strong>"#;
        assert!(matches!(
            extract_description(no_description),
            Err(TubeError::MissingPageNode("description"))
        ));
    }
}
