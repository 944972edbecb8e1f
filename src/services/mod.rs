//! Business logic services

pub mod availability;
pub mod bookings;
pub mod notifier;
pub mod staff;
pub mod visitors;

use std::sync::Arc;

use crate::repository::Repository;
use notifier::{NotificationSink, NotifierService};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
    pub availability: availability::AvailabilityService,
    pub visitors: visitors::VisitorsService,
    pub staff: staff::StaffService,
    pub notifier: NotifierService,
}

impl Services {
    /// Create all services with the given repository and notification sink
    pub fn new(repository: Repository, sink: Arc<dyn NotificationSink>) -> Self {
        let staff = staff::StaffService::new(Arc::new(repository.staff.clone()));
        let notifier = NotifierService::new(staff.clone(), sink);
        let visitors = visitors::VisitorsService::new(Arc::new(repository.visitors.clone()));

        Self {
            bookings: bookings::BookingsService::new(
                Arc::new(repository.bookings.clone()),
                visitors.clone(),
                notifier.clone(),
            ),
            availability: availability::AvailabilityService::new(Arc::new(
                repository.disabled_dates.clone(),
            )),
            visitors,
            staff,
            notifier,
        }
    }
}
