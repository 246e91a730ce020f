//! Combination of per-page text into one receipt document.

use tracing::debug;

/// Marker line placed before the text of page `n` (1-based) when `n > 1`.
pub fn page_marker(n: usize) -> String {
    format!("--- Page {} ---", n)
}

/// Join per-page text in capture order.
///
/// A single page is returned verbatim. With several pages, every page after
/// the first is preceded by a blank line, its marker and another blank line.
/// Pages without text are skipped entirely; marker numbers still follow the
/// capture position, so a blank second page leaves a gap between "Page 1"
/// text and "--- Page 3 ---". If no page has text the result is empty.
pub fn aggregate_pages<S: AsRef<str>>(pages: &[S]) -> String {
    if let [only] = pages {
        return only.as_ref().to_string();
    }

    let mut sections: Vec<String> = Vec::with_capacity(pages.len());

    for (i, page) in pages.iter().enumerate() {
        let text = page.as_ref();
        if text.trim().is_empty() {
            debug!("Page {} has no text, skipping", i + 1);
            continue;
        }

        if i == 0 {
            sections.push(text.to_string());
        } else {
            sections.push(format!("{}\n\n{}", page_marker(i + 1), text));
        }
    }

    sections.join("\n\n")
}
