pub mod dto;
pub mod endpoints;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{self, AppError, ErrorResponse};
use crate::models::{
    AuthResponse, ContactPayload, Course, CourseCategory, CoursePayload, LoginRequest,
    RegisterRequest, Testimonial, TestimonialPayload, course::flatten_categories,
};
use crate::session::SharedSession;

pub use dto::FileUpload;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("BMS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = match env::var("BMS_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("BMS_HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout),
        })
    }
}

/// The backend operations the dashboard relies on.
#[async_trait]
pub trait AcademyApi: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn create_course(&self, payload: &CoursePayload) -> Result<(), AppError>;
    async fn update_course(&self, course_code: &str, payload: &CoursePayload)
    -> Result<(), AppError>;
    async fn delete_course(&self, course_code: &str) -> Result<(), AppError>;
    /// Upload an image and return its hosted URL.
    async fn upload_image(&self, file: &FileUpload) -> Result<String, AppError>;

    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, AppError>;
    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<(), AppError>;
    async fn update_testimonial(&self, id: &str, payload: &TestimonialPayload)
    -> Result<(), AppError>;
    async fn delete_testimonial(&self, id: &str) -> Result<(), AppError>;

    async fn send_contact(&self, payload: &ContactPayload) -> Result<(), AppError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError>;
}

/// Which body field carries a failed response's message.
#[derive(Clone, Copy)]
enum ErrorField {
    Message,
    Error,
}

pub struct HttpAcademyApi {
    client: Client,
    config: ApiConfig,
    session: SharedSession,
}

impl HttpAcademyApi {
    pub fn new(config: ApiConfig, session: SharedSession) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// `collection` followed by `key` as a single percent-encoded segment.
    fn keyed_url(&self, collection: &str, key: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.url(collection)).map_err(|e| {
            AppError::Config(format!("invalid API URL {}: {}", self.config.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Config(format!("API URL cannot hold a path: {}", self.config.base_url))
            })?
            .push(key);
        Ok(url)
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.read().await.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder, field: ErrorField) -> Result<String, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!("backend responded {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let parsed = ErrorResponse::parse(&body);
            let message = match field {
                ErrorField::Message => parsed.message_first(),
                ErrorField::Error => parsed.error_first(),
            };
            return Err(error::from_status(status.as_u16(), message));
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.authorized(self.client.get(self.url(path))).await;
        let body = self.execute(request, ErrorField::Message).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", path, e);
            AppError::Decode(format!("{}: {}", path, e))
        })
    }
}

#[async_trait]
impl AcademyApi for HttpAcademyApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        let groups: Vec<CourseCategory> = self.get_json(endpoints::COURSES).await?;
        Ok(flatten_categories(groups))
    }

    async fn create_course(&self, payload: &CoursePayload) -> Result<(), AppError> {
        let request = self
            .authorized(self.client.post(self.url(endpoints::COURSES)).json(payload))
            .await;
        self.execute(request, ErrorField::Message).await?;
        Ok(())
    }

    async fn update_course(
        &self,
        course_code: &str,
        payload: &CoursePayload,
    ) -> Result<(), AppError> {
        let url = self.keyed_url(endpoints::COURSES, course_code)?;
        let request = self.authorized(self.client.put(url).json(payload)).await;
        self.execute(request, ErrorField::Message).await?;
        Ok(())
    }

    async fn delete_course(&self, course_code: &str) -> Result<(), AppError> {
        let url = self.keyed_url(endpoints::COURSES, course_code)?;
        let request = self.authorized(self.client.delete(url)).await;
        self.execute(request, ErrorField::Message).await?;
        Ok(())
    }

    async fn upload_image(&self, file: &FileUpload) -> Result<String, AppError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("image", part);

        let request = self
            .authorized(
                self.client
                    .post(self.url(endpoints::COURSE_UPLOAD))
                    .multipart(form),
            )
            .await;
        let body = self.execute(request, ErrorField::Message).await?;

        let parsed: dto::UploadResponse = serde_json::from_str(&body)?;
        parsed
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Decode("upload response has no url".to_string()))
    }

    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        self.get_json(endpoints::TESTIMONIALS).await
    }

    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<(), AppError> {
        let request = self
            .authorized(
                self.client
                    .post(self.url(endpoints::TESTIMONIALS))
                    .json(payload),
            )
            .await;
        self.execute(request, ErrorField::Message).await?;
        Ok(())
    }

    async fn update_testimonial(
        &self,
        id: &str,
        payload: &TestimonialPayload,
    ) -> Result<(), AppError> {
        let url = self.keyed_url(endpoints::TESTIMONIALS, id)?;
        let request = self.authorized(self.client.put(url).json(payload)).await;
        self.execute(request, ErrorField::Message).await?;
        Ok(())
    }

    async fn delete_testimonial(&self, id: &str) -> Result<(), AppError> {
        let url = self.keyed_url(endpoints::TESTIMONIALS, id)?;
        let request = self.authorized(self.client.delete(url)).await;
        self.execute(request, ErrorField::Message).await?;
        Ok(())
    }

    async fn send_contact(&self, payload: &ContactPayload) -> Result<(), AppError> {
        let request = self.client.post(self.url(endpoints::CONTACT)).json(payload);
        self.execute(request, ErrorField::Error).await?;
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        let builder = self
            .client
            .post(self.url(endpoints::ADMIN_LOGIN))
            .json(request);
        let body = self.execute(builder, ErrorField::Message).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        let builder = self
            .client
            .post(self.url(endpoints::ADMIN_REGISTER))
            .json(request);
        let body = self.execute(builder, ErrorField::Message).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Backend stand-in that accepts every mutation and lists nothing.
pub struct NoopAcademyApi;

#[async_trait]
impl AcademyApi for NoopAcademyApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(Vec::new())
    }

    async fn create_course(&self, _payload: &CoursePayload) -> Result<(), AppError> {
        Ok(())
    }

    async fn update_course(
        &self,
        _course_code: &str,
        _payload: &CoursePayload,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn delete_course(&self, _course_code: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn upload_image(&self, file: &FileUpload) -> Result<String, AppError> {
        Ok(format!("/uploads/{}", file.file_name))
    }

    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        Ok(Vec::new())
    }

    async fn create_testimonial(&self, _payload: &TestimonialPayload) -> Result<(), AppError> {
        Ok(())
    }

    async fn update_testimonial(
        &self,
        _id: &str,
        _payload: &TestimonialPayload,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn delete_testimonial(&self, _id: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn send_contact(&self, _payload: &ContactPayload) -> Result<(), AppError> {
        Ok(())
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, AppError> {
        Err(AppError::Auth {
            message: "No backend configured".to_string(),
            from_server: false,
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        Err(AppError::Auth {
            message: "No backend configured".to_string(),
            from_server: false,
        })
    }
}
