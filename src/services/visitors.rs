//! Visitor directory and guest statistics

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{GuestRecord, GuestVisit, NewVisitor, UpdateVisitor, Visitor},
    phone::normalize_api_phone,
    repository::VisitorStore,
};

/// Guests per page in the guest directory
pub const GUEST_PAGE_SIZE: i64 = 20;

#[derive(Clone)]
pub struct VisitorsService {
    visitors: Arc<dyn VisitorStore>,
}

impl VisitorsService {
    pub fn new(visitors: Arc<dyn VisitorStore>) -> Self {
        Self { visitors }
    }

    pub async fn list(&self) -> AppResult<Vec<Visitor>> {
        self.visitors.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Visitor> {
        self.visitors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))
    }

    /// Create a visitor unless the phone number is already known.
    ///
    /// Lookup strips formatting from the phone; an existing visitor is
    /// returned unchanged and the draft is discarded.
    pub async fn create(&self, draft: NewVisitor) -> AppResult<Visitor> {
        let lookup = normalize_api_phone(&draft.phone_number);
        if let Some(existing) = self.visitors.find_by_phone_number(&lookup).await? {
            return Ok(existing);
        }

        let visitor = Visitor {
            id: Uuid::new_v4(),
            phone_number: draft.phone_number,
            name: draft.name,
            notes: draft.notes,
        };
        self.visitors.save(&visitor).await?;
        Ok(visitor)
    }

    /// Replace a visitor's fields; the phone number must stay unique.
    pub async fn update(&self, id: Uuid, fields: UpdateVisitor) -> AppResult<Visitor> {
        self.get(id).await?;

        if let Some(other) = self
            .visitors
            .find_by_phone_number(&fields.phone_number)
            .await?
        {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Visitor with phone number {} already exists",
                    fields.phone_number
                )));
            }
        }

        let visitor = Visitor {
            id,
            phone_number: fields.phone_number,
            name: fields.name,
            notes: fields.notes,
        };
        self.visitors.save(&visitor).await?;
        Ok(visitor)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.visitors.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "Visitor with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// One page of the guest directory plus the total guest count.
    ///
    /// Guests are visitors with at least one confirmed booking, ranked
    /// by confirmed bookings. Pages are zero-based.
    pub async fn guests(&self, page: i64) -> AppResult<(Vec<GuestRecord>, i64)> {
        let page = page.max(0);
        let records = self
            .visitors
            .find_guests(GUEST_PAGE_SIZE, page * GUEST_PAGE_SIZE)
            .await?;
        let total = self.visitors.count_guests().await?;
        Ok((records, total))
    }

    /// Confirmed visits for a guest's phone number, newest first
    pub async fn guest_history(&self, phone: &str) -> AppResult<Vec<GuestVisit>> {
        self.visitors.find_confirmed_visits(phone).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockVisitorStore;

    fn visitor(phone: &str) -> Visitor {
        Visitor {
            id: Uuid::new_v4(),
            phone_number: phone.to_string(),
            name: "Aigerim".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_returns_existing_visitor_for_known_phone() {
        let known = visitor("87771112233");
        let known_id = known.id;

        let mut store = MockVisitorStore::new();
        store
            .expect_find_by_phone_number()
            .withf(|phone| phone == "87771112233")
            .times(1)
            .returning(move |_| Ok(Some(known.clone())));

        let svc = VisitorsService::new(Arc::new(store));
        let result = svc
            .create(NewVisitor {
                phone_number: "+7 (777) 111-22-33".to_string(),
                name: "Someone Else".to_string(),
                notes: Some("should be discarded".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.id, known_id);
        assert_eq!(result.name, "Aigerim");
    }

    #[tokio::test]
    async fn create_strips_formatting_for_the_lookup_only() {
        let mut store = MockVisitorStore::new();
        store
            .expect_find_by_phone_number()
            .withf(|phone| phone == "87771112233")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_save()
            .withf(|v| v.phone_number == "8 777 111-22-33")
            .times(1)
            .returning(|_| Ok(()));

        let svc = VisitorsService::new(Arc::new(store));
        svc.create(NewVisitor {
            phone_number: "8 777 111-22-33".to_string(),
            name: "Aigerim".to_string(),
            notes: None,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn update_rejects_a_phone_taken_by_another_visitor() {
        let target = visitor("87771112233");
        let target_id = target.id;
        let other = visitor("87779998877");

        let mut store = MockVisitorStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(target.clone())));
        store
            .expect_find_by_phone_number()
            .times(1)
            .returning(move |_| Ok(Some(other.clone())));

        let svc = VisitorsService::new(Arc::new(store));
        let err = svc
            .update(
                target_id,
                UpdateVisitor {
                    phone_number: "87779998877".to_string(),
                    name: "Aigerim".to_string(),
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_allows_keeping_your_own_phone() {
        let target = visitor("87771112233");
        let target_id = target.id;
        let for_lookup = target.clone();

        let mut store = MockVisitorStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(target.clone())));
        store
            .expect_find_by_phone_number()
            .times(1)
            .returning(move |_| Ok(Some(for_lookup.clone())));
        store
            .expect_save()
            .withf(|v| v.name == "Aigerim Renamed")
            .times(1)
            .returning(|_| Ok(()));

        let svc = VisitorsService::new(Arc::new(store));
        svc.update(
            target_id,
            UpdateVisitor {
                phone_number: "87771112233".to_string(),
                name: "Aigerim Renamed".to_string(),
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn delete_missing_visitor_is_not_found() {
        let mut store = MockVisitorStore::new();
        store
            .expect_delete_by_id()
            .times(1)
            .returning(|_| Ok(false));

        let svc = VisitorsService::new(Arc::new(store));
        let err = svc.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn guest_pages_are_twenty_wide() {
        let mut store = MockVisitorStore::new();
        store
            .expect_find_guests()
            .withf(|limit, offset| *limit == 20 && *offset == 40)
            .times(1)
            .returning(|_, _| Ok(vec![]));
        store.expect_count_guests().times(1).returning(|| Ok(57));

        let svc = VisitorsService::new(Arc::new(store));
        let (records, total) = svc.guests(2).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(total, 57);
    }

    #[tokio::test]
    async fn negative_pages_clamp_to_the_first() {
        let mut store = MockVisitorStore::new();
        store
            .expect_find_guests()
            .withf(|limit, offset| *limit == 20 && *offset == 0)
            .times(1)
            .returning(|_, _| Ok(vec![]));
        store.expect_count_guests().times(1).returning(|| Ok(0));

        let svc = VisitorsService::new(Arc::new(store));
        svc.guests(-3).await.unwrap();
    }
}
