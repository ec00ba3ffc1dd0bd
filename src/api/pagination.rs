// ==========================================
// Latam 看板系统 - 表格分页
// ==========================================
// 页码从 1 开始，越界页码夹紧到 [1, total_pages]
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认每页行数
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub showing_from: usize, // 1 起始；空集为 0
    pub showing_to: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 取指定页
///
/// `per_page` 为 0 时按默认行数处理；空集返回 total_pages = 1 的空页
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = if per_page == 0 {
        DEFAULT_ROWS_PER_PAGE
    } else {
        per_page
    };
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    let slice = items.get(start..end).unwrap_or_default().to_vec();

    Page {
        showing_from: if slice.is_empty() { 0 } else { start + 1 },
        showing_to: end,
        items: slice,
        page,
        per_page,
        total,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_and_last_page() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(&items, 1, DEFAULT_ROWS_PER_PAGE);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 3, DEFAULT_ROWS_PER_PAGE);
        assert_eq!(last.items, vec![21, 22, 23]);
        assert_eq!((last.showing_from, last.showing_to), (21, 23));
        assert!(!last.has_next());
    }

    #[test]
    fn test_paginate_clamps_page() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&items, 0, 2).page, 1);
        assert_eq!(paginate(&items, 99, 2).page, 3);
        assert_eq!(paginate(&items, 99, 2).items, vec![5]);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 4, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.per_page, DEFAULT_ROWS_PER_PAGE);
        assert_eq!((page.showing_from, page.showing_to), (0, 0));
    }
}
