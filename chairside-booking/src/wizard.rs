//! Booking wizard state machine
//!
//! A linear, forward-biased, resettable sequence:
//! services → shop → barber → date → time → customer details → submit.
//! Each state carries the selections made so far, so a jump past a missing
//! predecessor (picking a time with no barber) is unrepresentable rather
//! than merely guarded. Regressing to an earlier step re-triggers the
//! cascade-clear of every later selection.

use crate::availability::{AvailabilityAdapter, AvailabilityApi};
use crate::persistence::{self, CartSnapshot, CartStorage};
use crate::selection::{BookingTarget, DerivedTotals, SelectionStore, TargetField, TargetPatch};
use crate::submit::{AppointmentApi, CustomerDetails, SubmissionGateway, SubmitError};
use chrono::NaiveDate;
use shared::models::{Barber, Service, Shop};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Wizard position, with the data accumulated up to that step
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    SelectingServices,
    SelectingShop,
    SelectingBarber {
        shop: Shop,
    },
    SelectingDate {
        shop: Shop,
        barber: Barber,
    },
    SelectingTime {
        shop: Shop,
        barber: Barber,
        date: NaiveDate,
    },
    EnteringDetails {
        shop: Shop,
        barber: Barber,
        date: NaiveDate,
        time: String,
    },
    Submitting,
    Succeeded,
    Failed {
        message: String,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    /// The wizard cannot be entered past service selection with an empty
    /// cart; the UI redirects back to the services page
    #[error("select at least one service first")]
    NoServicesSelected,

    /// The requested action is not legal at the current step
    #[error("{action} is not allowed at this step")]
    InvalidTransition { action: &'static str },
}

#[derive(Debug, Error)]
pub enum BookingFlowError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Drives the wizard over a selection store, an availability adapter and
/// the submission gateway
///
/// Every mutation mirrors the store to the injected storage; availability
/// results gate which step becomes enterable next.
pub struct BookingFlow<A, S> {
    availability: AvailabilityAdapter<A>,
    gateway: SubmissionGateway<A>,
    storage: S,
    store: SelectionStore,
    state: WizardState,
}

impl<A, S> BookingFlow<A, S>
where
    A: AvailabilityApi + AppointmentApi,
    S: CartStorage,
{
    /// Restore the persisted selection (if any) and start at the services
    /// step
    pub fn new(api: Arc<A>, storage: S) -> Self {
        let snapshot = persistence::restore(&storage);
        Self {
            availability: AvailabilityAdapter::new(api.clone()),
            gateway: SubmissionGateway::new(api),
            storage,
            store: snapshot.into_store(),
            state: WizardState::SelectingServices,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn totals(&self) -> DerivedTotals {
        self.store.totals()
    }

    fn persist(&self) {
        persistence::mirror(&self.storage, &CartSnapshot::of(&self.store));
    }

    // ========== Service selection ==========

    /// Toggle a service and return the fresh totals
    ///
    /// A duration change invalidates any slot chosen for the old duration.
    pub fn toggle_service(&mut self, service: Service) -> DerivedTotals {
        let before = self.store.totals().total_duration;
        self.store.toggle_service(service);
        self.invalidate_time_on_duration_change(before);
        self.persist();
        self.store.totals()
    }

    /// Remove a service unconditionally
    pub fn remove_service(&mut self, service_id: &str) -> DerivedTotals {
        let before = self.store.totals().total_duration;
        self.store.remove_service(service_id);
        self.invalidate_time_on_duration_change(before);
        self.persist();
        self.store.totals()
    }

    /// A cart edit past the date step orphans the chosen slot: it was
    /// queried for the old duration. Clear it and regress to time
    /// selection, where re-picking the date re-runs the slot query.
    fn invalidate_time_on_duration_change(&mut self, previous_duration: i64) {
        if self.store.totals().total_duration == previous_duration {
            return;
        }
        let (shop, barber, date) = match &self.state {
            WizardState::SelectingTime { shop, barber, date }
            | WizardState::EnteringDetails {
                shop, barber, date, ..
            } => (shop.clone(), barber.clone(), *date),
            _ => return,
        };
        self.store.clear_target_from(TargetField::Time);
        self.state = WizardState::SelectingTime { shop, barber, date };
    }

    /// Empty the cart and return to the services step
    pub fn clear_cart(&mut self) {
        self.store.clear();
        self.persist();
        self.state = WizardState::SelectingServices;
    }

    // ========== Transitions ==========

    /// Enter the booking sequence
    ///
    /// Guarded by a non-empty selection: with an empty cart the wizard
    /// stays at (and redirects to) service selection.
    pub fn begin(&mut self) -> Result<(), WizardError> {
        if self.store.is_empty() {
            self.state = WizardState::SelectingServices;
            return Err(WizardError::NoServicesSelected);
        }
        self.state = WizardState::SelectingShop;
        Ok(())
    }

    /// Select the shop; clears any barber/date/time and fetches the
    /// barbers able to cover the current total duration
    pub async fn choose_shop(&mut self, shop: Shop) -> Result<Vec<Barber>, WizardError> {
        match self.state {
            WizardState::SelectingShop
            | WizardState::SelectingBarber { .. }
            | WizardState::SelectingDate { .. }
            | WizardState::SelectingTime { .. }
            | WizardState::EnteringDetails { .. } => {}
            _ => return Err(WizardError::InvalidTransition { action: "choose shop" }),
        }

        self.store.clear_target_from(TargetField::Barber);
        self.store.merge_target(TargetPatch {
            shop: Some(shop.clone()),
            ..Default::default()
        });
        self.persist();

        let duration = self.store.totals().total_duration;
        debug!(shop = %shop.id, duration, "shop selected, querying barbers");
        let barbers = self.availability.barbers_for_duration(&shop.id, duration).await;
        self.state = WizardState::SelectingBarber { shop };
        Ok(barbers)
    }

    /// Select the barber; clears any date/time and fetches candidate dates
    pub async fn choose_barber(&mut self, barber: Barber) -> Result<Vec<NaiveDate>, WizardError> {
        let shop = match &self.state {
            WizardState::SelectingBarber { shop }
            | WizardState::SelectingDate { shop, .. }
            | WizardState::SelectingTime { shop, .. }
            | WizardState::EnteringDetails { shop, .. } => shop.clone(),
            _ => return Err(WizardError::InvalidTransition { action: "choose barber" }),
        };

        self.store.clear_target_from(TargetField::Date);
        self.store.merge_target(TargetPatch {
            barber: Some(barber.clone()),
            ..Default::default()
        });
        self.persist();

        let dates = self.availability.available_dates(&shop.id, &barber.id).await;
        self.state = WizardState::SelectingDate { shop, barber };
        Ok(dates)
    }

    /// Select the date; clears any time and fetches the open start times
    /// for the current total duration
    pub async fn choose_date(&mut self, date: NaiveDate) -> Result<Vec<String>, WizardError> {
        let (shop, barber) = match &self.state {
            WizardState::SelectingDate { shop, barber }
            | WizardState::SelectingTime { shop, barber, .. }
            | WizardState::EnteringDetails { shop, barber, .. } => {
                (shop.clone(), barber.clone())
            }
            _ => return Err(WizardError::InvalidTransition { action: "choose date" }),
        };

        self.store.clear_target_from(TargetField::Time);
        self.store.merge_target(TargetPatch {
            date: Some(date),
            ..Default::default()
        });
        self.persist();

        let duration = self.store.totals().total_duration;
        let slots = self
            .availability
            .available_slots(&shop.id, &barber.id, date, duration)
            .await;
        self.state = WizardState::SelectingTime { shop, barber, date };
        Ok(slots)
    }

    /// Select the start time and advance to customer details
    pub fn choose_time(&mut self, time: String) -> Result<(), WizardError> {
        let (shop, barber, date) = match &self.state {
            WizardState::SelectingTime { shop, barber, date }
            | WizardState::EnteringDetails {
                shop, barber, date, ..
            } => (shop.clone(), barber.clone(), *date),
            _ => return Err(WizardError::InvalidTransition { action: "choose time" }),
        };

        self.store.merge_target(TargetPatch {
            time: Some(time.clone()),
            ..Default::default()
        });
        self.persist();

        self.state = WizardState::EnteringDetails {
            shop,
            barber,
            date,
            time,
        };
        Ok(())
    }

    /// Submit the booking
    ///
    /// Local validation failures keep the wizard at the details step.
    /// A backend rejection or transport failure lands in `Failed` with the
    /// selection preserved; success clears the cart (and its persisted
    /// mirror) and lands in `Succeeded`.
    pub async fn submit(&mut self, customer: &CustomerDetails) -> Result<(), BookingFlowError> {
        match std::mem::replace(&mut self.state, WizardState::Submitting) {
            WizardState::EnteringDetails {
                shop,
                barber,
                date,
                time,
            } => {
                let result = self
                    .gateway
                    .submit_booking(self.store.services(), self.store.target(), customer)
                    .await;

                match result {
                    Ok(()) => {
                        self.store.clear();
                        self.persist();
                        self.state = WizardState::Succeeded;
                        Ok(())
                    }
                    Err(e) if e.is_local() => {
                        self.state = WizardState::EnteringDetails {
                            shop,
                            barber,
                            date,
                            time,
                        };
                        Err(e.into())
                    }
                    Err(e) => {
                        self.state = WizardState::Failed {
                            message: e.user_message(),
                        };
                        Err(e.into())
                    }
                }
            }
            other => {
                self.state = other;
                Err(WizardError::InvalidTransition { action: "submit" }.into())
            }
        }
    }

    /// Leave the failure view and return to the details step
    pub fn retry(&mut self) -> Result<(), WizardError> {
        if !matches!(self.state, WizardState::Failed { .. }) {
            return Err(WizardError::InvalidTransition { action: "retry" });
        }

        // The failed submission preserved the store, so the target is
        // normally still complete; a cleared cart falls back to the start.
        let BookingTarget {
            shop: Some(shop),
            barber: Some(barber),
            date: Some(date),
            time: Some(time),
        } = self.store.target().clone()
        else {
            self.state = WizardState::SelectingServices;
            return Ok(());
        };

        self.state = WizardState::EnteringDetails {
            shop,
            barber,
            date,
            time,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryCartStorage;
    use async_trait::async_trait;
    use chairside_client::{ClientError, ClientResult};
    use shared::models::AppointmentCreate;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        barber_queries: Mutex<Vec<i64>>,
        date_queries: AtomicUsize,
        slot_queries: Mutex<Vec<i64>>,
        submissions: AtomicUsize,
        reject_detail: Mutex<Option<String>>,
        fail_availability: AtomicBool,
    }

    #[async_trait]
    impl AvailabilityApi for FakeApi {
        async fn barbers_for_duration(
            &self,
            _shop_id: &str,
            duration: i64,
        ) -> ClientResult<Vec<Barber>> {
            self.barber_queries.lock().unwrap().push(duration);
            if self.fail_availability.load(Ordering::SeqCst) {
                return Err(ClientError::Internal(Some("backend down".to_string())));
            }
            Ok(vec![barber()])
        }

        async fn available_dates(
            &self,
            _shop_id: &str,
            _barber_id: &str,
        ) -> ClientResult<Vec<NaiveDate>> {
            self.date_queries.fetch_add(1, Ordering::SeqCst);
            Ok(vec![date()])
        }

        async fn available_slots(
            &self,
            _shop_id: &str,
            _barber_id: &str,
            _date: NaiveDate,
            duration: i64,
        ) -> ClientResult<Vec<String>> {
            self.slot_queries.lock().unwrap().push(duration);
            Ok(vec!["14:30".to_string()])
        }
    }

    #[async_trait]
    impl AppointmentApi for FakeApi {
        async fn submit_appointment(&self, _payload: &AppointmentCreate) -> ClientResult<()> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            match self.reject_detail.lock().unwrap().as_ref() {
                Some(detail) => Err(ClientError::Validation(Some(detail.clone()))),
                None => Ok(()),
            }
        }
    }

    fn service(id: &str, price: f64, duration: i64) -> Service {
        Service {
            id: id.to_string(),
            name: format!("Service {id}"),
            price,
            duration,
        }
    }

    fn shop() -> Shop {
        Shop {
            id: "shop-1".to_string(),
            name: "Downtown".to_string(),
            address: "1 Main St".to_string(),
            phone_number: "5550001".to_string(),
            tax_rate: 0.18,
        }
    }

    fn barber() -> Barber {
        Barber {
            id: "barber-1".to_string(),
            name: "Sam".to_string(),
            contact_info: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Jo".to_string(),
            phone: "1234567890".to_string(),
            gender: None,
        }
    }

    type TestFlow = BookingFlow<FakeApi, Arc<MemoryCartStorage>>;

    fn flow() -> (Arc<FakeApi>, Arc<MemoryCartStorage>, TestFlow) {
        let api = Arc::new(FakeApi::default());
        let storage = Arc::new(MemoryCartStorage::new());
        let flow = BookingFlow::new(api.clone(), storage.clone());
        (api, storage, flow)
    }

    /// Drive the wizard to the details step with services A and B selected
    async fn flow_at_details() -> (Arc<FakeApi>, Arc<MemoryCartStorage>, TestFlow) {
        let (api, storage, mut flow) = flow();
        flow.toggle_service(service("a", 20.0, 30));
        flow.toggle_service(service("b", 10.0, 15));
        flow.begin().unwrap();
        flow.choose_shop(shop()).await.unwrap();
        flow.choose_barber(barber()).await.unwrap();
        flow.choose_date(date()).await.unwrap();
        flow.choose_time("14:30".to_string()).unwrap();
        (api, storage, flow)
    }

    #[tokio::test]
    async fn empty_cart_cannot_enter_the_wizard() {
        let (_, _, mut flow) = flow();
        assert_eq!(flow.begin(), Err(WizardError::NoServicesSelected));
        assert_eq!(*flow.state(), WizardState::SelectingServices);
    }

    #[tokio::test]
    async fn steps_cannot_be_skipped() {
        let (_, _, mut flow) = flow();
        flow.toggle_service(service("a", 20.0, 30));
        flow.begin().unwrap();

        let err = flow.choose_barber(barber()).await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidTransition { .. }));
        assert!(flow.choose_time("14:30".to_string()).is_err());
    }

    #[tokio::test]
    async fn barber_query_carries_the_selection_duration() {
        let (api, _, mut flow) = flow();
        flow.toggle_service(service("a", 20.0, 30));
        flow.toggle_service(service("b", 10.0, 15));
        flow.begin().unwrap();

        flow.choose_shop(shop()).await.unwrap();
        assert_eq!(*api.barber_queries.lock().unwrap(), vec![45]);
    }

    #[tokio::test]
    async fn changing_shop_cascade_clears_later_selections() {
        let (_, _, mut flow) = flow_at_details().await;
        assert!(flow.store().target().is_complete());

        // Re-opening the shop selector regresses and re-triggers the clear
        flow.choose_shop(shop()).await.unwrap();

        let target = flow.store().target();
        assert!(target.shop.is_some());
        assert!(target.barber.is_none());
        assert!(target.date.is_none());
        assert!(target.time.is_none());
        assert!(matches!(*flow.state(), WizardState::SelectingBarber { .. }));
    }

    #[tokio::test]
    async fn cart_edit_after_time_selection_invalidates_the_slot() {
        let (api, _, mut flow) = flow_at_details().await;
        assert_eq!(*api.slot_queries.lock().unwrap(), vec![45]);

        // The chosen 14:30 slot was queried for 45 minutes; growing the
        // cart to 90 must not let it through
        flow.toggle_service(service("c", 30.0, 45));

        assert!(flow.store().target().time.is_none());
        assert!(matches!(*flow.state(), WizardState::SelectingTime { .. }));

        let err = flow.submit(&customer()).await.unwrap_err();
        assert!(matches!(
            err,
            BookingFlowError::Wizard(WizardError::InvalidTransition { .. })
        ));
        assert_eq!(api.submissions.load(Ordering::SeqCst), 0);

        // Re-picking the date re-runs the slot query for the new duration
        flow.choose_date(date()).await.unwrap();
        assert_eq!(*api.slot_queries.lock().unwrap(), vec![45, 90]);
    }

    #[tokio::test]
    async fn availability_failure_keeps_the_wizard_usable() {
        let (api, _, mut flow) = flow();
        api.fail_availability.store(true, Ordering::SeqCst);
        flow.toggle_service(service("a", 20.0, 30));
        flow.begin().unwrap();

        let barbers = flow.choose_shop(shop()).await.unwrap();
        assert!(barbers.is_empty());
        assert!(matches!(*flow.state(), WizardState::SelectingBarber { .. }));
    }

    #[tokio::test]
    async fn successful_submission_clears_cart_and_mirror() {
        let (api, storage, mut flow) = flow_at_details().await;

        flow.submit(&customer()).await.unwrap();

        assert_eq!(*flow.state(), WizardState::Succeeded);
        assert_eq!(flow.totals().total_duration, 0);
        assert_eq!(flow.totals().total_price, 0.0);
        assert_eq!(api.submissions.load(Ordering::SeqCst), 1);

        // The persisted slot is emptied too, not just the in-memory store
        assert_eq!(storage.stored(), Some(CartSnapshot::default()));
    }

    #[tokio::test]
    async fn rejected_submission_preserves_the_selection() {
        let (api, storage, mut flow) = flow_at_details().await;
        *api.reject_detail.lock().unwrap() = Some("barber unavailable".to_string());

        let err = flow.submit(&customer()).await.unwrap_err();
        assert!(matches!(err, BookingFlowError::Submit(_)));
        assert_eq!(
            *flow.state(),
            WizardState::Failed {
                message: "barber unavailable".to_string()
            }
        );
        assert_eq!(flow.store().services().len(), 2);
        assert!(flow.store().target().is_complete());

        // The persisted snapshot is untouched by the failure
        let snapshot = storage.stored().unwrap();
        assert_eq!(snapshot.services.len(), 2);
        assert!(snapshot.selections.is_complete());
    }

    #[tokio::test]
    async fn invalid_details_keep_the_wizard_at_the_details_step() {
        let (api, _, mut flow) = flow_at_details().await;

        let no_phone = CustomerDetails {
            phone: String::new(),
            ..customer()
        };
        let err = flow.submit(&no_phone).await.unwrap_err();

        assert!(matches!(
            err,
            BookingFlowError::Submit(SubmitError::InvalidCustomer(_))
        ));
        assert!(matches!(*flow.state(), WizardState::EnteringDetails { .. }));
        assert_eq!(api.submissions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn retry_returns_to_the_details_step() {
        let (api, _, mut flow) = flow_at_details().await;
        *api.reject_detail.lock().unwrap() = Some("barber unavailable".to_string());
        let _ = flow.submit(&customer()).await;

        *api.reject_detail.lock().unwrap() = None;
        flow.retry().unwrap();
        assert!(matches!(*flow.state(), WizardState::EnteringDetails { .. }));

        flow.submit(&customer()).await.unwrap();
        assert_eq!(*flow.state(), WizardState::Succeeded);
    }
}
