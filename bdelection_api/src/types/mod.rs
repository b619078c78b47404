mod district;
pub use self::district::{District, DistrictID};

mod seat;
pub use self::seat::{Seat, SeatSlug};
