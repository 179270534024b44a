//! Seat row geometry for seatplan.
//!
//! Everything in this crate is pure: a [`RowLayout`] goes in, seat poses, a
//! guide path or a centroid come out. The plan store and the editor session
//! both consume these functions, so any change to the bow formula lands in
//! one place.

mod point;
mod rect;
mod row;

pub use point::{normalize_degrees, Point};
pub use rect::Rect;
pub use row::{
    centroid, guide_path, guide_path_flat, seat_positions, RowLayout, SeatPose, BOW_FACTOR,
    DEFAULT_GUIDE_STEPS,
};
