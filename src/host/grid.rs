//! Grid views as rendered on product listing pages.

use serde::Deserialize;
use std::fmt;
use std::sync::Mutex;

use super::Request;
use crate::domain::Product;

/// One row of a grid's result set.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridRow {
    Product(Product),
    /// A row the storefront rendered but which is not a product.
    Other { type_name: String },
}

/// A filtered, paginated listing together with the request that produced it.
#[derive(Debug, Deserialize)]
pub struct ProductGridView {
    #[serde(default)]
    pub data: GridData,
    #[serde(default)]
    pub request: Request,
}

impl ProductGridView {
    pub fn new(data: GridData, request: Request) -> Self { Self { data, request } }
}

/// Result set backing a grid view.
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridData {
    /// The current page of a paginated result. Restartable.
    Page(Page),
    /// Forward-only rows that can be walked once.
    #[serde(skip)]
    Stream(OneShotRows),
    #[default]
    NotTraversable,
}

impl GridData {
    pub fn page(rows: Vec<GridRow>) -> Self { Self::Page(Page { rows }) }

    pub fn stream<I>(rows: I) -> Self
    where
        I: Iterator<Item = GridRow> + Send + 'static,
    {
        Self::Stream(OneShotRows::new(rows))
    }

    /// Lazily yields the rows, or `None` when the data cannot be iterated.
    ///
    /// Rows are produced on demand; callers that stop early never pull the rest.
    pub fn rows(&self) -> Option<Box<dyn Iterator<Item = GridRow> + '_>> {
        match self {
            Self::Page(page) => Some(Box::new(page.rows.iter().cloned())),
            Self::Stream(stream) => Some(stream.take()),
            Self::NotTraversable => None,
        }
    }
}

/// Rows of the page being rendered. Pagination fields sent by the host are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub rows: Vec<GridRow>,
}

/// Rows that can be iterated a single time. Later walks see nothing.
pub struct OneShotRows(Mutex<Option<Box<dyn Iterator<Item = GridRow> + Send>>>);

impl OneShotRows {
    pub fn new<I>(rows: I) -> Self
    where
        I: Iterator<Item = GridRow> + Send + 'static,
    {
        Self(Mutex::new(Some(Box::new(rows))))
    }

    fn take(&self) -> Box<dyn Iterator<Item = GridRow> + '_> {
        let taken = self.0.lock().unwrap_or_else(|e| e.into_inner()).take();
        match taken {
            Some(rows) => rows,
            None => Box::new(std::iter::empty()),
        }
    }
}

impl fmt::Debug for OneShotRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let consumed = self.0.lock().map(|g| g.is_none()).unwrap_or(true);
        f.debug_struct("OneShotRows").field("consumed", &consumed).finish()
    }
}
