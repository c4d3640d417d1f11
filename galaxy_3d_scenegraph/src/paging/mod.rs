//! Paging module
//!
//! On-demand loading of subgraphs referenced by `PagedLOD` nodes: the
//! residency table, the coordinator consulted by traversals, and the
//! background pager that performs the loads.

mod residency;
mod coordinator;
mod database_pager;

pub use residency::{PagingKey, Residency, ResidencyStatus, PagedEntry, ResidencyTable};
pub use coordinator::{PagingPolicy, LoadRequest, PagingCoordinator, SubgraphLoader};
pub use database_pager::DatabasePager;
