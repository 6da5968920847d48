//! Pure derivation of the visible page from the catalog snapshot.

use gamedeck_core::Product;
use serde::Serialize;

pub const PAGE_SIZE: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub items: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Case-insensitive substring match on the name. An empty term keeps every
/// record; a record without a name never matches a non-empty term.
pub fn filter<'a>(products: &'a [Product], search: &str) -> Vec<&'a Product> {
    if search.is_empty() {
        return products.iter().collect();
    }

    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|product| {
            product.name.as_deref().is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn page_count(filtered_count: usize) -> usize {
    filtered_count.div_ceil(PAGE_SIZE)
}

/// Clamp into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn derive_page(products: &[Product], search: &str, page: usize) -> PageView {
    let filtered = filter(products, search);
    let total_pages = page_count(filtered.len());
    let page = clamp_page(page, total_pages);
    let items = filtered
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|product| (*product).clone())
        .collect();

    PageView {
        items,
        page,
        total_pages,
        filtered_count: filtered.len(),
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use gamedeck_core::{Product, ProductId};

    use super::{clamp_page, derive_page, filter, page_count, PAGE_SIZE};

    fn named(id: i64, name: Option<&str>) -> Product {
        Product {
            id: ProductId(id),
            name: name.map(str::to_string),
            detail: None,
            coverimage: None,
        }
    }

    fn numbered(count: i64) -> Vec<Product> {
        (1..=count).map(|id| named(id, Some(&format!("Game {id}")))).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let products =
            vec![named(1, Some("Chess")), named(2, Some("Checkers")), named(3, Some("Go"))];

        let names: Vec<_> =
            filter(&products, "CH").iter().filter_map(|product| product.name.clone()).collect();

        assert_eq!(names, vec!["Chess", "Checkers"]);
    }

    #[test]
    fn unnamed_records_only_survive_empty_search() {
        let products = vec![named(1, None), named(2, Some("Go"))];

        assert_eq!(filter(&products, "").len(), 2);
        assert_eq!(filter(&products, "g").len(), 1);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(8), 1);
        assert_eq!(page_count(9), 2);
        assert_eq!(page_count(17), 3);
    }

    #[test]
    fn clamp_handles_empty_filter() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn nine_records_split_across_two_pages() {
        let products = numbered(9);

        let first = derive_page(&products, "", 1);
        let second = derive_page(&products, "", 2);

        assert_eq!(first.items.len(), PAGE_SIZE);
        assert_eq!(first.total_pages, 2);
        assert!(!first.has_previous && first.has_next);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, ProductId(9));
        assert!(second.has_previous && !second.has_next);
    }

    #[test]
    fn pages_partition_the_filtered_set_in_order() {
        let products = numbered(20);
        let expected: Vec<_> = filter(&products, "1").into_iter().cloned().collect();
        let total_pages = page_count(expected.len());

        let union: Vec<_> = (1..=total_pages)
            .flat_map(|page| derive_page(&products, "1", page).items)
            .collect();

        assert_eq!(union, expected);
    }

    #[test]
    fn out_of_range_page_is_clamped_in_view() {
        let view = derive_page(&numbered(3), "", 7);

        assert_eq!(view.page, 1);
        assert_eq!(view.items.len(), 3);
    }

    #[test]
    fn empty_result_has_single_empty_page() {
        let view = derive_page(&numbered(3), "zzz", 1);

        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.items.is_empty());
        assert!(!view.has_previous && !view.has_next);
    }
}
