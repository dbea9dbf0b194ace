//! Search core: pure state machine, result cache and view-model helpers.
mod cache;
mod effect;
mod hit;
mod msg;
mod sort;
mod state;
mod update;
mod view_model;

pub use cache::{PageResult, ResultCache};
pub use effect::Effect;
pub use hit::{Hit, HitId};
pub use msg::Msg;
pub use sort::{display_order, sort_hits, ParseSortKeyError, SortKey};
pub use state::{AppState, RequestId, DEFAULT_QUERY};
pub use update::update;
pub use view_model::AppViewModel;
