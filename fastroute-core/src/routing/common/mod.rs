// Components shared by every planner
mod context;
mod result;
mod state;
mod weights;

pub use context::SearchContext;
pub use result::{PathResult, RefuelStop};
pub use state::SearchError;
pub use weights::{effective_cost, is_traversable};

pub(crate) use result::format_ids;
pub(crate) use state::{Predecessor, State, trace_back};

/// A planner that answers one start/end query.
///
/// Implementations own their search inputs, so calling `find_path` twice gives
/// the same answer.
pub trait SearchAlgorithm<'g> {
    /// Short human readable name, used in logs and reports
    fn name(&self) -> &'static str;

    /// Cheapest eligible route, or `None` when the end cannot be reached
    fn find_path(&self) -> Option<PathResult<'g>>;
}
