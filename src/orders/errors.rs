//! Errors raised while paging through orders.

use thiserror::Error;

/// Error returned by [`fetch_all_orders`](crate::orders::fetch_all_orders).
///
/// `index` is the position of the offending record in the accumulated table.
#[derive(Debug, Error)]
pub enum FetchOrdersError<E>
where
    E: std::error::Error + 'static,
{
    /// The order source failed to return a page.
    #[error(transparent)]
    Source(#[from] E),

    /// A record in a page was not a JSON object.
    #[error("Order record {index} is not a JSON object")]
    NotAnObject {
        /// Position of the record in the table.
        index: usize,
    },

    /// The last record of a full page has no integer `id`, so the next page
    /// cannot be requested.
    #[error("Order record {index} has no integer id to continue paging from")]
    MissingOrderId {
        /// Position of the record in the table.
        index: usize,
    },
}
