pub mod interest;
pub mod lookup;
pub mod opportunity;
pub mod shortlist;
