pub mod geometry;
pub mod hit;
pub mod id;
pub mod model;
pub mod snapshot;

pub use geometry::{Bounds, Point};
pub use hit::{hit_test, hit_test_rect};
pub use id::{LayerId, ObjectId};
pub use model::*;
pub use snapshot::{SNAPSHOT_FORMAT, SNAPSHOT_VERSION, SnapshotError};
