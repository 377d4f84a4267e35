//! Availability querying
//!
//! A thin adapter over the backend's availability endpoints. No caching,
//! no retry: a transport failure degrades to an empty result set (logged)
//! so the UI lands in a "no results" state instead of a crashed one, and
//! the user retries by changing an input.

use async_trait::async_trait;
use chairside_client::{ClientResult, HttpClient};
use chrono::NaiveDate;
use shared::models::Barber;
use std::sync::Arc;
use tracing::warn;

/// Availability endpoints, as a seam so the booking flow can be driven
/// without a network in tests
#[async_trait]
pub trait AvailabilityApi: Send + Sync {
    /// Barbers able to perform a contiguous block of `duration` minutes
    async fn barbers_for_duration(
        &self,
        shop_id: &str,
        duration: i64,
    ) -> ClientResult<Vec<Barber>>;

    /// Days in the lookahead window with at least one open slot
    async fn available_dates(
        &self,
        shop_id: &str,
        barber_id: &str,
    ) -> ClientResult<Vec<NaiveDate>>;

    /// Start times ("HH:MM") with a free block of `duration` minutes
    async fn available_slots(
        &self,
        shop_id: &str,
        barber_id: &str,
        date: NaiveDate,
        duration: i64,
    ) -> ClientResult<Vec<String>>;
}

#[async_trait]
impl AvailabilityApi for HttpClient {
    async fn barbers_for_duration(
        &self,
        shop_id: &str,
        duration: i64,
    ) -> ClientResult<Vec<Barber>> {
        self.available_barbers(shop_id, duration).await
    }

    async fn available_dates(
        &self,
        shop_id: &str,
        barber_id: &str,
    ) -> ClientResult<Vec<NaiveDate>> {
        HttpClient::available_dates(self, shop_id, barber_id).await
    }

    async fn available_slots(
        &self,
        shop_id: &str,
        barber_id: &str,
        date: NaiveDate,
        duration: i64,
    ) -> ClientResult<Vec<String>> {
        HttpClient::available_slots(self, shop_id, barber_id, date, duration).await
    }
}

/// Degrading adapter over an [`AvailabilityApi`]
///
/// Guards the zero-duration case (no query is issued at all) and converts
/// every transport error into an empty list.
pub struct AvailabilityAdapter<A> {
    api: Arc<A>,
}

impl<A: AvailabilityApi> AvailabilityAdapter<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Barbers for the current total duration; empty without a network
    /// call when the duration is zero or negative
    pub async fn barbers_for_duration(&self, shop_id: &str, duration: i64) -> Vec<Barber> {
        if duration <= 0 {
            return Vec::new();
        }
        self.api
            .barbers_for_duration(shop_id, duration)
            .await
            .unwrap_or_else(|e| {
                warn!(shop_id, duration, "barber availability query failed: {e}");
                Vec::new()
            })
    }

    /// Candidate dates for a barber; empty on error
    pub async fn available_dates(&self, shop_id: &str, barber_id: &str) -> Vec<NaiveDate> {
        self.api
            .available_dates(shop_id, barber_id)
            .await
            .unwrap_or_else(|e| {
                warn!(shop_id, barber_id, "date availability query failed: {e}");
                Vec::new()
            })
    }

    /// Open start times on a date; empty on error or non-positive duration
    pub async fn available_slots(
        &self,
        shop_id: &str,
        barber_id: &str,
        date: NaiveDate,
        duration: i64,
    ) -> Vec<String> {
        if duration <= 0 {
            return Vec::new();
        }
        self.api
            .available_slots(shop_id, barber_id, date, duration)
            .await
            .unwrap_or_else(|e| {
                warn!(shop_id, barber_id, %date, "slot availability query failed: {e}");
                Vec::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chairside_client::ClientError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake API that counts calls and can be told to fail
    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeApi {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn result<T>(&self, value: T) -> ClientResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::Internal(Some("backend down".to_string())))
            } else {
                Ok(value)
            }
        }
    }

    #[async_trait]
    impl AvailabilityApi for FakeApi {
        async fn barbers_for_duration(
            &self,
            _shop_id: &str,
            _duration: i64,
        ) -> ClientResult<Vec<Barber>> {
            self.result(vec![Barber {
                id: "barber-1".to_string(),
                name: "Sam".to_string(),
                contact_info: None,
            }])
        }

        async fn available_dates(
            &self,
            _shop_id: &str,
            _barber_id: &str,
        ) -> ClientResult<Vec<NaiveDate>> {
            self.result(vec![NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()])
        }

        async fn available_slots(
            &self,
            _shop_id: &str,
            _barber_id: &str,
            _date: NaiveDate,
            _duration: i64,
        ) -> ClientResult<Vec<String>> {
            self.result(vec!["14:30".to_string()])
        }
    }

    #[tokio::test]
    async fn zero_duration_issues_no_query() {
        let api = Arc::new(FakeApi::default());
        let adapter = AvailabilityAdapter::new(api.clone());

        let barbers = adapter.barbers_for_duration("shop-1", 0).await;
        assert!(barbers.is_empty());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_error_degrades_to_empty_list() {
        let api = Arc::new(FakeApi::failing());
        let adapter = AvailabilityAdapter::new(api.clone());

        let barbers = adapter.barbers_for_duration("shop-1", 45).await;
        assert!(barbers.is_empty());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        let dates = adapter.available_dates("shop-1", "barber-1").await;
        assert!(dates.is_empty());
    }

    #[tokio::test]
    async fn successful_queries_pass_through() {
        let api = Arc::new(FakeApi::default());
        let adapter = AvailabilityAdapter::new(api);

        let barbers = adapter.barbers_for_duration("shop-1", 45).await;
        assert_eq!(barbers.len(), 1);

        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let slots = adapter.available_slots("shop-1", "barber-1", date, 45).await;
        assert_eq!(slots, vec!["14:30".to_string()]);
    }
}
