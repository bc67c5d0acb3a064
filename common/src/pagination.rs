//! Abstractions for page-number pagination.

use std::num::NonZeroUsize;

/// A page of `I` items out of a bigger collection.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was requested with.
    pub arguments: Arguments,

    /// Total number of items in the whole collection.
    pub total_count: usize,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] out of the provided `items`.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
        total_count: usize,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            arguments,
            total_count,
        }
    }

    /// Cuts a [`Page`] out of the whole collection of `items`.
    #[must_use]
    pub fn slice(arguments: Arguments, items: impl IntoIterator<Item = I>) -> Self {
        let (offset, limit) = (arguments.offset(), arguments.limit());
        let mut total_count = 0;
        let mut page = Vec::with_capacity(limit);
        for (i, item) in items.into_iter().enumerate() {
            total_count = i + 1;
            if i >= offset && page.len() < limit {
                page.push(item);
            }
        }
        Self {
            items: page,
            arguments,
            total_count,
        }
    }

    /// Returns the 1-based number of this [`Page`].
    #[must_use]
    pub fn number(&self) -> usize {
        self.arguments.page.get()
    }

    /// Returns the total number of [`Page`]s in the collection.
    ///
    /// An empty collection still has a single (empty) [`Page`].
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.arguments.per_page.get()).max(1)
    }

    /// Indicates whether there is a [`Page`] after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number() < self.page_count()
    }

    /// Indicates whether there is a [`Page`] before this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number() > 1
    }

    /// Converts the items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            arguments: self.arguments,
            total_count: self.total_count,
        }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested page.
    pub page: NonZeroUsize,

    /// Number of items per page.
    pub per_page: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`] for the provided `page` number, defaulting
    /// to the first page.
    ///
    /// [`None`] is returned if the `page` number is not positive or
    /// `per_page` is zero.
    pub fn new<Num>(page: Option<Num>, per_page: usize) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        let page = match page {
            Some(n) => NonZeroUsize::new(n.try_into().ok()?)?,
            None => NonZeroUsize::MIN,
        };
        Some(Self {
            page,
            per_page: NonZeroUsize::new(per_page)?,
        })
    }

    /// Returns the number of items to skip before this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.get() - 1).saturating_mul(self.per_page.get())
    }

    /// Returns the maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page.get()
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Filter being applied to the collection before paginating.
    pub filter: F,
}

/// Defines pagination types for a node and a filter.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    #[test]
    fn rejects_non_positive_pages() {
        assert!(Arguments::new(Some(0), 12).is_none());
        assert!(Arguments::new(Some(-3), 12).is_none());
        assert!(Arguments::new(Some(1), 0).is_none());
        assert_eq!(Arguments::new::<i32>(None, 12).unwrap().page.get(), 1);
    }

    #[test]
    fn slices_collection() {
        let args = Arguments::new(Some(2), 12).unwrap();
        let page = Page::slice(args, 0..30);

        assert_eq!(page.items, (12..24).collect::<Vec<_>>());
        assert_eq!(page.total_count, 30);
        assert_eq!(page.page_count(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn last_and_empty_pages() {
        let last = Page::slice(Arguments::new(Some(3), 12).unwrap(), 0..30);
        assert_eq!(last.items.len(), 6);
        assert!(!last.has_next());

        let empty = Page::slice(Arguments::new::<u8>(None, 12).unwrap(), 0..0);
        assert!(empty.items.is_empty());
        assert_eq!(empty.page_count(), 1);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());

        let beyond = Page::slice(Arguments::new(Some(5), 12).unwrap(), 0..30);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 30);
    }
}
