//! Fixed-size pages over an ordered list of records.

/// Number of records on one page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the records on 1-based `page`.
///
/// Pages before the first (`page < 1`) and past the last are empty; callers
/// report an empty page as "not found".
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    match page_start(page) {
        Some(start) if start < items.len() => {
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}

fn page_start(page: i64) -> Option<usize> {
    if page < 1 {
        return None;
    }
    usize::try_from(page - 1)
        .ok()?
        .checked_mul(QUESTIONS_PER_PAGE)
}
