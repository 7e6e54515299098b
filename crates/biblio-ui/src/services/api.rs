//! HTTP client for the catalogue backend.
//!
//! # Design
//! - Every request races a fixed 15 s deadline; losing the race aborts the
//!   underlying fetch and surfaces [`ApiError::Timeout`].
//! - Non-success responses become [`ApiError::Http`] with the message the
//!   server put in its body; transport failures become
//!   [`ApiError::Network`]. No request is ever retried here.
//! - The bearer token lives behind interior mutability so the single
//!   client instance survives login and logout.

use std::cell::RefCell;

use biblio_api_models::{
    Book, CduResponse, Exemplar, Loan, LoanCreateRequest, LoanCreated, LoansRequest, LoginRequest,
    LoginResponse, Profile, ProfileCheck, ProfileRequest, ProfileSaved, ProfileUpdate, UploadReport,
    UserHit, UserQuery,
};
use futures::future::{Either, select};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::{AbortController, File, FormData};

use crate::core::gateway::{self, ApiError, REQUEST_TIMEOUT_MS};

/// Client for the catalogue backend, shared once per app boot.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    token: RefCell<Option<String>>,
}

impl ApiClient {
    /// Client rooted at the given backend origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(None),
        }
    }

    /// Install or drop the bearer token used for subsequent calls.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: Request) -> Request {
        match self.token.borrow().as_deref() {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    /// Race a prepared request against the fixed deadline.
    async fn dispatch(request: Request, controller: AbortController) -> Result<Response, ApiError> {
        let outcome = select(
            Box::pin(request.send()),
            Box::pin(TimeoutFuture::new(REQUEST_TIMEOUT_MS)),
        )
        .await;
        match outcome {
            Either::Left((result, _)) => {
                result.map_err(|err| ApiError::Network(err.to_string()))
            }
            Either::Right(((), _)) => {
                controller.abort();
                Err(ApiError::Timeout)
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status,
                message: gateway::server_message(status, &response.status_text(), &body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    fn abort_controller() -> Result<AbortController, ApiError> {
        AbortController::new()
            .map_err(|_| ApiError::Network("abort controller unavailable".to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let controller = Self::abort_controller()?;
        let request = self.authorize(
            Request::get(&self.url(path)).abort_signal(Some(&controller.signal())),
        );
        let response = Self::dispatch(request, controller).await?;
        Self::decode(response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        request: Request,
        controller: AbortController,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .authorize(request)
            .json(body)
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let response = Self::dispatch(request, controller).await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let controller = Self::abort_controller()?;
        let request = Request::post(&self.url(path)).abort_signal(Some(&controller.signal()));
        self.send_json(request, controller, body).await
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let controller = Self::abort_controller()?;
        let request = Request::patch(&self.url(path)).abort_signal(Some(&controller.signal()));
        self.send_json(request, controller, body).await
    }

    /// Catalogue list, optionally narrowed server-side.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; callers on the list screens fall back to the
    /// unfiltered fetch plus local filtering.
    pub async fn fetch_books(&self, search: Option<&str>) -> Result<Vec<Book>, ApiError> {
        self.get_json(&gateway::books_path(search)).await
    }

    /// One catalogue record.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn fetch_book(&self, book_id: i64) -> Result<Book, ApiError> {
        self.get_json(&gateway::book_path(book_id)).await
    }

    /// Exemplars held for one catalogue record.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn fetch_book_exemplars(&self, book_id: i64) -> Result<Vec<Exemplar>, ApiError> {
        self.get_json(&gateway::book_exemplars_path(book_id)).await
    }

    /// Full exemplar inventory.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn fetch_exemplars(&self) -> Result<Vec<Exemplar>, ApiError> {
        self.get_json(gateway::EXEMPLARS_PATH).await
    }

    /// Credential login.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 carries the server's message.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json(gateway::LOGIN_PATH, request).await
    }

    /// Forward an identity-provider credential for authoritative
    /// verification.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn login_with_credential(&self, credential: &str) -> Result<LoginResponse, ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            credential: &'a str,
        }
        self.post_json(gateway::LOGIN_PATH, &Body { credential })
            .await
    }

    /// Loan history of one account.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn fetch_loans(&self, username: &str) -> Result<Vec<Loan>, ApiError> {
        self.post_json(
            gateway::LOANS_PATH,
            &LoansRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    /// Register a new loan.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; conflicts carry the server's message.
    pub async fn create_loan(&self, request: &LoanCreateRequest) -> Result<LoanCreated, ApiError> {
        self.post_json(gateway::LOAN_CREATE_PATH, request).await
    }

    /// Borrower lookup by name or email fragment.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserHit>, ApiError> {
        self.post_json(
            gateway::USER_SEARCH_PATH,
            &UserQuery {
                query: query.to_string(),
            },
        )
        .await
    }

    /// Profile of one account.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, ApiError> {
        self.post_json(
            gateway::PROFILE_PATH,
            &ProfileRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    /// Probe whether an update would change the stored profile.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn check_profile(&self, update: &ProfileUpdate) -> Result<ProfileCheck, ApiError> {
        self.post_json(gateway::PROFILE_CHECK_PATH, update).await
    }

    /// Persist a profile update.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn save_profile(&self, update: &ProfileUpdate) -> Result<ProfileSaved, ApiError> {
        self.patch_json(gateway::PROFILE_PATH, update).await
    }

    /// Upload a CSV of accounts as multipart form data.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn upload_csv(&self, file: &File) -> Result<UploadReport, ApiError> {
        let form = FormData::new()
            .map_err(|_| ApiError::Network("form-data unavailable".to_string()))?;
        form.append_with_blob_and_filename("archivo", file, &file.name())
            .map_err(|_| ApiError::Network("could not attach the file".to_string()))?;
        let controller = Self::abort_controller()?;
        let request = self.authorize(
            Request::post(&self.url(gateway::CSV_UPLOAD_PATH))
                .abort_signal(Some(&controller.signal())),
        );
        let response = Self::dispatch(request.body(form), controller).await?;
        Self::decode(response).await
    }

    /// Classification code for one registry code, `None` when the record
    /// carries none.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; label batching maps failures to the placeholder
    /// code instead of propagating them.
    pub async fn fetch_cdu(&self, registre: &str) -> Result<Option<String>, ApiError> {
        let response: CduResponse = self.get_json(&gateway::cdu_path(registre)).await?;
        Ok(response.cdu)
    }
}
