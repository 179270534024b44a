//! Seat plan document model and store.
//!
//! [`SeatPlan`] is the document: categories, an ordered element list and the
//! view transform. [`PlanStore`] is the only way the editor mutates it; every
//! row edit goes through a single regeneration path so derived seats can never
//! drift from their row.

pub mod bounds;
pub mod category;
pub mod element;
pub mod ids;
pub mod plan;
pub mod row;
pub mod selection;
pub mod store;

pub use bounds::{element_bounds, elements_in_rect, hit_test};
pub use category::{CategoryDeletePolicy, CategoryPatch, SeatCategory};
pub use element::{
    Element, ElementKind, ElementPatch, Seat, SeatStatus, Text, Zone, ZoneShape,
    DEFAULT_FONT_SIZE, DEFAULT_SEAT_SIZE,
};
pub use ids::{CategoryId, ElementId, PlanId};
pub use plan::{PlanMeta, SeatPlan};
pub use row::{Row, RowLimits, RowPatch, SeatOverride};
pub use selection::Selection;
pub use store::{PlanLimits, PlanStore};

pub use seatplan_geometry::{Point, Rect};
