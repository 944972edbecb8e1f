//! Data models for Resa

pub mod booking;
pub mod disabled_date;
pub mod staff;
pub mod visitor;

// Re-export commonly used types
pub use booking::{Booking, BookingFilter, BookingStatus, NewBooking, UpdateBooking};
pub use disabled_date::DisabledDate;
pub use staff::StaffMember;
pub use visitor::{GuestRecord, GuestVisit, NewVisitor, UpdateVisitor, Visitor};
