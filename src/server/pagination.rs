pub const QUESTIONS_PER_PAGE: usize = 10;

pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole collection, not of the page
    pub total: usize,
}

/// Slices the 1-based `page` out of `items`. Pages past the end, or below 1,
/// are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Page<T> {
    let total = items.len();
    let start = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));
    let items = match start {
        Some(start) if start < total => items
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect(),
        _ => Vec::new(),
    };
    Page { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_is_the_first_ten() {
        let page = paginate(numbers(25), 1);
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.total, 25);
    }

    #[test]
    fn last_page_is_partial() {
        let page = paginate(numbers(25), 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_total() {
        let page = paginate(numbers(20), 3);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 20);

        assert!(paginate(numbers(20), 1000).items.is_empty());
        assert!(paginate(numbers(20), i64::MAX).items.is_empty());
    }

    #[test]
    fn pages_below_one_are_empty() {
        assert!(paginate(numbers(5), 0).items.is_empty());
        assert!(paginate(numbers(5), -3).items.is_empty());
        assert!(paginate(numbers(5), i64::MIN).items.is_empty());
    }

    #[test]
    fn empty_collection() {
        let page = paginate(Vec::<usize>::new(), 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
