//! Paging and sorting model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Normalizes a client-supplied direction.
    ///
    /// Only a case-insensitive `"desc"` selects [`SortDirection::Desc`];
    /// anything else, including garbage, is ascending.
    ///
    /// ```
    /// use cms_core::SortDirection;
    ///
    /// assert_eq!(SortDirection::parse_lenient("DESC"), SortDirection::Desc);
    /// assert_eq!(SortDirection::parse_lenient("sideways"), SortDirection::Asc);
    /// ```
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Returns `true` for descending order.
    pub fn is_descending(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Contact property a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Order by identifier.
    ContactId,
    /// Order by name.
    #[default]
    Name,
    /// Order by email.
    Email,
    /// Order by phone (absent phones sort first when ascending).
    Phone,
}

impl SortField {
    /// Wire name of the field, as accepted in `sortBy`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContactId => "contactId",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contactId" => Ok(Self::ContactId),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(Error::validation_field(
                "sortBy",
                format!("cannot sort by unknown property '{other}'"),
            )),
        }
    }
}

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    /// Property to order by
    pub field: SortField,
    /// Direction of the ordering
    pub direction: SortDirection,
}

impl Sort {
    /// Creates a sort on `field` in `direction`.
    pub fn by(direction: SortDirection, field: SortField) -> Self {
        Self { field, direction }
    }
}

/// A request for one page of a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// Fails with a validation error when `size` is zero.
    pub fn of(page: u32, size: u32, sort: Sort) -> Result<Self> {
        if size == 0 {
            return Err(Error::validation_field(
                "size",
                "page size must not be less than one",
            ));
        }
        Ok(Self { page, size, sort })
    }

    /// Zero-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Requested ordering.
    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Number of items to skip: `page * size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of a result set plus its metadata.
///
/// Serialized in camelCase: `content`, `totalElements`, `totalPages`,
/// `number`, `size`, `numberOfElements`, `first`, `last`, `empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Number of items matching the query across all pages
    pub total_elements: u64,
    /// Number of pages at the requested size
    pub total_pages: u64,
    /// Zero-based index of this page
    pub number: u32,
    /// Requested page size
    pub size: u32,
    /// Number of items actually on this page
    pub number_of_elements: usize,
    /// Whether this is the first page
    pub first: bool,
    /// Whether this is the last page
    pub last: bool,
    /// Whether this page has no items
    pub empty: bool,
}

impl<T> Page<T> {
    /// Builds a page from its items, the request, and the total match count.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size();
        let number = request.page();
        let total_pages = total_elements.div_ceil(u64::from(size));
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number,
            size,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }

    /// Converts every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
