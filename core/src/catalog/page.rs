// shopfront/src/catalog/page.rs

use serde::Serialize;

/// A 1-based page of `per_page` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
  pub page: u32,
  pub per_page: u32,
}

impl PageRequest {
  /// Pages below 1 (or absent) are read as the first page.
  pub fn new(page: Option<i64>, per_page: u32) -> Self {
    let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32;
    Self {
      page,
      per_page: per_page.max(1),
    }
  }

  pub fn first(per_page: u32) -> Self {
    Self::new(None, per_page)
  }

  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.per_page)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub current_page: u32,
  pub last_page: u32,
  pub per_page: u32,
  pub total: u64,
}

impl<T> Page<T> {
  /// Wraps one page of already-fetched `items` out of `total` matches.
  pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
    let per_page = u64::from(request.per_page);
    let last_page = total.div_ceil(per_page).max(1);
    Self {
      items,
      current_page: request.page,
      last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
      per_page: request.per_page,
      total,
    }
  }

  /// Cuts the requested page out of a fully ordered result set. A page past the
  /// end yields no items.
  pub fn slice(ordered: Vec<T>, request: PageRequest) -> Self {
    let total = ordered.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = ordered.into_iter().skip(offset).take(request.per_page as usize).collect();
    Self::new(items, total, request)
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      current_page: self.current_page,
      last_page: self.last_page,
      per_page: self.per_page,
      total: self.total,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn requests_below_one_start_at_the_first_page() {
    assert_eq!(PageRequest::new(Some(0), 12).page, 1);
    assert_eq!(PageRequest::new(Some(-4), 12).page, 1);
    assert_eq!(PageRequest::new(None, 12).offset(), 0);
    assert_eq!(PageRequest::new(Some(3), 15).offset(), 30);
  }

  #[test]
  fn slicing_reports_metadata() {
    let page = Page::slice((1..=30).collect::<Vec<_>>(), PageRequest::new(Some(3), 12));
    assert_eq!(page.items, (25..=30).collect::<Vec<_>>());
    assert_eq!(page.current_page, 3);
    assert_eq!(page.last_page, 3);
    assert_eq!(page.per_page, 12);
    assert_eq!(page.total, 30);
  }

  #[test]
  fn past_the_last_page_is_empty_not_an_error() {
    let page = Page::slice((1..=5).collect::<Vec<_>>(), PageRequest::new(Some(9), 12));
    assert!(page.items.is_empty());
    assert_eq!(page.current_page, 9);
    assert_eq!(page.last_page, 1);
    assert_eq!(page.total, 5);
  }

  #[test]
  fn empty_result_still_has_one_page() {
    let page: Page<u8> = Page::slice(Vec::new(), PageRequest::first(12));
    assert_eq!(page.last_page, 1);
    assert_eq!(page.total, 0);
  }
}
