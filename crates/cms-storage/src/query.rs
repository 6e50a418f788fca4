//! Paged contact query builder.
//!
//! A [`ContactQuery`] composes three things handed to a store:
//! - an optional [`SearchFilter`]: case-insensitive substring on `name` OR `email`
//! - a sort clause (requested field and direction, then `contact_id` ascending)
//! - an offset/limit pair derived from the page request
//!
//! Backends either render it to SQL ([`ContactQuery::push_where`],
//! [`ContactQuery::push_order_and_limit`]) or evaluate it directly
//! ([`ContactQuery::matches`], [`ContactQuery::compare`]).

use std::cmp::Ordering;

use cms_core::{Contact, PageRequest, SortField};
use sqlx::{QueryBuilder, Sqlite};

/// Escape character used in rendered `LIKE` patterns.
const LIKE_ESCAPE: char = '\\';

/// Case folding shared by search needles, the in-memory matcher, and the
/// SQLite `*_search` columns.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Case-insensitive substring filter over `name` and `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    /// Builds a filter from a client search term.
    ///
    /// Returns `None` for an absent or blank term: no predicate applies.
    pub fn new(term: Option<&str>) -> Option<Self> {
        let term = term?;
        if term.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: fold_case(term),
        })
    }

    /// Lowercased search term.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns whether `contact` satisfies the filter.
    pub fn matches(&self, contact: &Contact) -> bool {
        fold_case(&contact.name).contains(&self.needle)
            || fold_case(&contact.email).contains(&self.needle)
    }

    /// `LIKE` pattern matching the needle anywhere, with `%`, `_`, and the
    /// escape character itself matched literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() + 2);
        pattern.push('%');
        for c in self.needle.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Filter, sort, and page window for a contact listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    filter: Option<SearchFilter>,
    page: PageRequest,
}

impl ContactQuery {
    /// Creates an unfiltered query for `page`.
    pub fn new(page: PageRequest) -> Self {
        Self { filter: None, page }
    }

    /// Adds the search predicate for `term` (no-op when absent or blank).
    pub fn with_search(mut self, term: Option<&str>) -> Self {
        self.filter = SearchFilter::new(term);
        self
    }

    /// Active search filter, if any.
    pub fn filter(&self) -> Option<&SearchFilter> {
        self.filter.as_ref()
    }

    /// Page window and ordering.
    pub fn page_request(&self) -> &PageRequest {
        &self.page
    }

    /// Rows to skip, saturated into the SQL integer range.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.page.offset()).unwrap_or(i64::MAX)
    }

    /// Maximum rows to return.
    pub fn limit(&self) -> i64 {
        i64::from(self.page.size())
    }

    /// Returns whether `contact` passes the filter (always true when unfiltered).
    pub fn matches(&self, contact: &Contact) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.matches(contact))
    }

    /// Orders two contacts the way the rendered `ORDER BY` clause does.
    pub fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
        let sort = self.page.sort();
        let primary = match sort.field {
            SortField::ContactId => a.contact_id.cmp(&b.contact_id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Email => a.email.cmp(&b.email),
            SortField::Phone => a.phone.cmp(&b.phone),
        };
        let primary = if sort.direction.is_descending() {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| a.contact_id.cmp(&b.contact_id))
    }

    /// Appends the `WHERE` clause (if filtered) to `builder`.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(filter) = &self.filter {
            let pattern = filter.like_pattern();
            builder
                .push(" WHERE name_search LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR email_search LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'");
        }
    }

    /// Appends `ORDER BY ... LIMIT ... OFFSET ...` to `builder`.
    pub fn push_order_and_limit(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let sort = self.page.sort();
        let direction = if sort.direction.is_descending() {
            "DESC"
        } else {
            "ASC"
        };
        builder
            .push(" ORDER BY ")
            .push(sort_column(sort.field))
            .push(" ")
            .push(direction)
            .push(", contact_id ASC LIMIT ")
            .push_bind(self.limit())
            .push(" OFFSET ")
            .push_bind(self.offset());
    }
}

/// Column backing a sortable field.
pub(crate) fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::ContactId => "contact_id",
        SortField::Name => "name",
        SortField::Email => "email",
        SortField::Phone => "phone",
    }
}
