/// File name for the CSV output of a crawl: `articles-<search>-<pages>-page.csv`
///
/// Spaces in the search term become hyphens.
pub fn output_file_name(search: &str, total_pages: u32) -> String {
    format!(
        "articles-{}-{}-page.csv",
        search.replace(' ', "-"),
        total_pages
    )
}
