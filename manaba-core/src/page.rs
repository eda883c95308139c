//! HTML helpers for manaba pages.
//!
//! These only turn already-fetched markup into the text the extractor
//! consumes; fetching and login live in the CLI.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::assignment::Category;
use crate::error::{ManabaError, ManabaResult};

static COURSE_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"td.course a[href*="course_"]:not(.courseweekly-fav)"#)
        .expect("valid selector")
});
static COURSE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.course").expect("valid selector"));
static COURSE_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#coursename").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));

/// True when the page lists at least one course, i.e. the session is logged in.
pub fn has_course_list(home_html: &str) -> bool {
    let document = Html::parse_document(home_html);
    document.select(&COURSE_CELL).next().is_some()
}

/// Course page URLs linked from the home page, resolved against `page_url`
/// and deduplicated in page order.
pub fn course_links(home_html: &str, page_url: &str) -> ManabaResult<Vec<String>> {
    let base = Url::parse(page_url).map_err(|e| ManabaError::Url {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;
    let document = Html::parse_document(home_html);

    let mut seen = HashSet::new();
    let links = document
        .select(&COURSE_LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|url| url.to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect();

    Ok(links)
}

/// URL of a category listing for a course page URL.
pub fn listing_url(course_url: &str, category: Category) -> String {
    format!("{}{}", course_url, category.path_suffix())
}

/// Text of the `#coursename` element, if present and non-empty.
pub fn course_name(course_html: &str) -> Option<String> {
    let document = Html::parse_document(course_html);
    document
        .select(&COURSE_NAME)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty())
}

/// Text of every table row, whitespace-normalized, in document order.
pub fn row_texts(listing_html: &str) -> Vec<String> {
    let document = Html::parse_document(listing_html);
    document
        .select(&ROW)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"
<html><body><table>
<tr>
  <td class="course"><a href="course_1001">統計学</a><a class="courseweekly-fav" href="course_1001?fav">★</a></td>
  <td class="course"><a href="/ct/course_2002">英語</a></td>
  <td class="course"><a href="course_1001">統計学</a></td>
  <td class="news"><a href="course_9999_news">news</a></td>
</tr>
</table></body></html>"#;

    #[test]
    fn test_course_links_are_resolved_and_deduplicated() {
        let links = course_links(HOME, "https://manaba.example.test/ct/home").unwrap();

        assert_eq!(
            links,
            vec![
                "https://manaba.example.test/ct/course_1001".to_string(),
                "https://manaba.example.test/ct/course_2002".to_string(),
            ]
        );
    }

    #[test]
    fn test_login_check() {
        assert!(has_course_list(HOME));
        assert!(!has_course_list("<html><body><form id=\"login\"></form></body></html>"));
    }

    #[test]
    fn test_course_name() {
        let html = r#"<div id="coursename">
            統計学
        </div>"#;
        assert_eq!(course_name(html), Some("統計学".to_string()));
        assert_eq!(course_name("<div id=\"other\">x</div>"), None);
    }

    #[test]
    fn test_row_texts_keep_date_tokens_intact() {
        let html = r#"<table>
<tr><th>タイトル</th><th>状態</th><th>受付開始日時</th><th>受付終了日時</th></tr>
<tr>
  <td><a href="x">第3回レポート</a></td>
  <td><span>受付中</span><span>未提出</span></td>
  <td>2025-01-10 09:00</td>
  <td>2025-01-15
      23:59</td>
</tr>
</table>"#;

        let rows = row_texts(html);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            "第3回レポート 受付中 未提出 2025-01-10 09:00 2025-01-15 23:59"
        );
    }

    #[test]
    fn test_listing_url() {
        assert_eq!(
            listing_url("https://m.test/ct/course_1", Category::Quiz),
            "https://m.test/ct/course_1_query"
        );
    }
}
