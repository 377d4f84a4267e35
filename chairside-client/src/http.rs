//! HTTP client for network-based API calls
//!
//! One method per backend endpoint. Raw provider documents are normalized
//! to the clean `shared` types here, so callers never see the provider's
//! `$id` identity field.

use crate::error::error_detail;
use crate::{ClientConfig, ClientError, ClientResult, ReportPeriod};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    Appointment, AppointmentCreate, AppointmentStatus, AppointmentStatusUpdate, Barber,
    BarberCreate, BarberSchedule, FinancialsReport, RawAppointmentDocument, RawBarberDocument,
    RawServiceDocument, RawShopDocument, ScheduleDay, Service, Shop, StaffMember,
};
use tracing::warn;

/// HTTP client for making network requests to the booking backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body and query parameters
    async fn post_with<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .query(query)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            let detail = error_detail(&body);
            warn!(%status, "request rejected: {}", detail.as_deref().unwrap_or(&body));
            return match status {
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(detail)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(detail)),
                _ => Err(ClientError::Internal(detail)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Catalog API ==========

    /// Fetch the service catalog
    pub async fn services(&self) -> ClientResult<Vec<Service>> {
        let docs: Vec<RawServiceDocument> = self.get("/api/services").await?;
        Ok(docs.into_iter().map(Service::from).collect())
    }

    /// Fetch all shop locations
    pub async fn shops(&self) -> ClientResult<Vec<Shop>> {
        let docs: Vec<RawShopDocument> = self.get("/api/shops").await?;
        Ok(docs.into_iter().map(Shop::from).collect())
    }

    /// Fetch a single shop by id
    ///
    /// The backend has no single-shop endpoint; this fetches the full list
    /// and picks the match.
    pub async fn shop_by_id(&self, shop_id: &str) -> ClientResult<Option<Shop>> {
        let shops = self.shops().await?;
        Ok(shops.into_iter().find(|s| s.id == shop_id))
    }

    /// Fetch the barbers working at a shop
    pub async fn barbers_for_shop(&self, shop_id: &str) -> ClientResult<Vec<Barber>> {
        let docs: Vec<RawBarberDocument> =
            self.get(&format!("/api/shops/{shop_id}/barbers")).await?;
        Ok(docs.into_iter().map(Barber::from).collect())
    }

    // ========== Availability API ==========

    /// Dates within the backend's lookahead window that have any open slot
    pub async fn available_dates(
        &self,
        shop_id: &str,
        barber_id: &str,
    ) -> ClientResult<Vec<NaiveDate>> {
        self.get_with(
            "/api/availability/dates",
            &[
                ("shop_id", shop_id.to_string()),
                ("barber_id", barber_id.to_string()),
            ],
        )
        .await
    }

    /// Start times ("HH:MM", shop-local) with a free contiguous block of
    /// `total_duration` minutes on the given date
    pub async fn available_slots(
        &self,
        shop_id: &str,
        barber_id: &str,
        date: NaiveDate,
        total_duration: i64,
    ) -> ClientResult<Vec<String>> {
        self.get_with(
            "/api/availability/slots",
            &[
                ("shop_id", shop_id.to_string()),
                ("barber_id", barber_id.to_string()),
                ("date_str", date.format("%Y-%m-%d").to_string()),
                ("total_duration", total_duration.to_string()),
            ],
        )
        .await
    }

    /// Barbers able to start a walk-in of the given duration right now
    pub async fn available_barbers(
        &self,
        shop_id: &str,
        duration: i64,
    ) -> ClientResult<Vec<Barber>> {
        let docs: Vec<RawBarberDocument> = self
            .get_with(
                "/api/manager/available-barbers",
                &[
                    ("shop_id", shop_id.to_string()),
                    ("duration", duration.to_string()),
                ],
            )
            .await?;
        Ok(docs.into_iter().map(Barber::from).collect())
    }

    // ========== Appointments API ==========

    /// Create an appointment (customer booking or walk-in)
    pub async fn create_appointment(
        &self,
        payload: &AppointmentCreate,
    ) -> ClientResult<serde_json::Value> {
        self.post("/api/appointments", payload).await
    }

    // ========== Manager API ==========

    /// Appointments for a shop on a given date (backend defaults to today)
    pub async fn manager_appointments(
        &self,
        shop_id: &str,
        date: Option<NaiveDate>,
    ) -> ClientResult<Vec<Appointment>> {
        let mut query = vec![("shop_id", shop_id.to_string())];
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        let docs: Vec<RawAppointmentDocument> =
            self.get_with("/api/manager/appointments", &query).await?;
        docs.into_iter()
            .map(|doc| {
                Appointment::try_from(doc)
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))
            })
            .collect()
    }

    /// Transition an appointment's status
    pub async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> ClientResult<Appointment> {
        let doc: RawAppointmentDocument = self
            .patch(
                &format!("/api/manager/appointments/{appointment_id}/status"),
                &AppointmentStatusUpdate { status },
            )
            .await?;
        Appointment::try_from(doc).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Add a barber to a shop
    pub async fn add_staff(
        &self,
        shop_id: &str,
        payload: &BarberCreate,
    ) -> ClientResult<Barber> {
        let doc: RawBarberDocument = self
            .post_with(
                "/api/manager/staff",
                &[("shop_id", shop_id.to_string())],
                payload,
            )
            .await?;
        Ok(Barber::from(doc))
    }

    /// Fetch a barber's weekly schedule
    pub async fn barber_schedule(&self, barber_id: &str) -> ClientResult<Vec<ScheduleDay>> {
        let response: BarberSchedule = self
            .get(&format!("/api/manager/staff/{barber_id}/schedule"))
            .await?;
        Ok(response.schedules)
    }

    /// Replace a barber's weekly schedule
    pub async fn update_barber_schedule(
        &self,
        barber_id: &str,
        shop_id: &str,
        schedule: &BarberSchedule,
    ) -> ClientResult<()> {
        let _: serde_json::Value = self
            .post_with(
                &format!("/api/manager/staff/{barber_id}/schedule"),
                &[("shop_id", shop_id.to_string())],
                schedule,
            )
            .await?;
        Ok(())
    }

    /// Financial report for one shop
    pub async fn manager_financials(
        &self,
        shop_id: &str,
        period: ReportPeriod,
    ) -> ClientResult<FinancialsReport> {
        let mut query = vec![("shop_id", shop_id.to_string())];
        if let Some(param) = period.query_param() {
            query.push(param);
        }
        self.get_with("/api/manager/financials", &query).await
    }

    // ========== Owner API ==========

    /// All shops in the business
    pub async fn owner_shops(&self) -> ClientResult<Vec<Shop>> {
        let docs: Vec<RawShopDocument> = self.get("/api/owner/shops").await?;
        Ok(docs.into_iter().map(Shop::from).collect())
    }

    /// All staff, optionally filtered to one shop
    pub async fn owner_staff(&self, shop_id: Option<&str>) -> ClientResult<Vec<StaffMember>> {
        let mut query = Vec::new();
        if let Some(shop_id) = shop_id {
            query.push(("shop_id", shop_id.to_string()));
        }

        let docs: Vec<RawBarberDocument> = self.get_with("/api/owner/staff", &query).await?;
        Ok(docs.into_iter().map(StaffMember::from).collect())
    }

    /// Financial report across all shops, or filtered to one
    pub async fn owner_financials(
        &self,
        shop_id: Option<&str>,
        period: ReportPeriod,
    ) -> ClientResult<FinancialsReport> {
        let mut query = Vec::new();
        if let Some(shop_id) = shop_id {
            query.push(("shop_id", shop_id.to_string()));
        }
        if let Some(param) = period.query_param() {
            query.push(param);
        }
        self.get_with("/api/owner/financials", &query).await
    }
}
