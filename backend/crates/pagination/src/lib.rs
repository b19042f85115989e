//! Page-number pagination primitives shared by backend list endpoints.
//!
//! A [`PageRequest`] is the validated `page`/`pageSize` pair taken from a
//! query string. A [`Page`] is the response envelope that carries one slice of
//! items together with the totals clients need to render pagination controls.
//!
//! Pages are 1-based. Requests with a zero page or zero page size are rejected;
//! oversized page sizes are clamped to [`MAX_PAGE_SIZE`].

use serde::{Deserialize, Serialize};

/// Page size used when the client does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures raised when building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Validated page coordinates.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 20).expect("valid page");
/// assert_eq!(request.offset(), 40);
/// assert_eq!(request.limit(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, clamping `page_size` to [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero.
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self {
            page,
            page_size: page_size.min(MAX_PAGE_SIZE),
        })
    }

    /// Build a request from optional query parameters, applying defaults.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a supplied value is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, DEFAULT_PAGE_SIZE};
    ///
    /// let request = PageRequest::from_params(None, None).expect("defaults");
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
    /// ```
    pub fn from_params(page: Option<u32>, page_size: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// First page with the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Number of pages needed to hold `total_items` at `page_size` per page.
///
/// # Examples
/// ```
/// use pagination::total_pages;
///
/// assert_eq!(total_pages(0, 10), 0);
/// assert_eq!(total_pages(10, 10), 1);
/// assert_eq!(total_pages(11, 10), 2);
/// ```
#[must_use]
pub fn total_pages(total_items: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(u64::from(page_size))
}

/// One page of results plus the totals for the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in result order.
    pub items: Vec<T>,
    /// 1-based number of this page.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of items across all pages.
    pub total_items: u64,
    /// Number of pages across the result set.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wrap an already-sliced set of items.
    #[must_use]
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total_items,
            total_pages: total_pages(total_items, request.page_size()),
        }
    }

    /// Slice a complete, already-ordered result set down to the requested page.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(2, 2).expect("valid page");
    /// let page = Page::from_full(vec![1, 2, 3, 4, 5], &request);
    /// assert_eq!(page.items, vec![3, 4]);
    /// assert_eq!(page.total_pages, 3);
    /// ```
    #[must_use]
    pub fn from_full(all: Vec<T>, request: &PageRequest) -> Self {
        let total_items = all.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(offset).take(limit).collect();
        Self::new(items, request, total_items)
    }

    /// Transform each item while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    /// Transform each item with a fallible mapping, keeping the metadata.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        })
    }
}
