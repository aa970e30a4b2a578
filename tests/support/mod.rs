#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bms_admin::api::{AcademyApi, FileUpload};
use bms_admin::error::AppError;
use bms_admin::models::{
    AdminProfile, AuthResponse, ContactPayload, Course, CoursePayload, Fees, LoginRequest,
    RegisterRequest, Testimonial, TestimonialPayload,
};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchCourses,
    CreateCourse(CoursePayload),
    UpdateCourse(String, CoursePayload),
    DeleteCourse(String),
    Upload(String),
    FetchTestimonials,
    CreateTestimonial(TestimonialPayload),
    UpdateTestimonial(String, TestimonialPayload),
    DeleteTestimonial(String),
    Contact(ContactPayload),
    Login(String),
    Register(String),
}

/// In-memory backend that records every call it receives.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    pub courses: Mutex<Vec<Course>>,
    pub testimonials: Mutex<Vec<Testimonial>>,
    upload_error: Mutex<Option<AppError>>,
    mutation_error: Mutex<Option<AppError>>,
    fetch_error: Mutex<Option<AppError>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl RecordingApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_courses(courses: Vec<Course>) -> Arc<Self> {
        let api = Self::default();
        *api.courses.lock().unwrap() = courses;
        Arc::new(api)
    }

    pub fn with_testimonials(testimonials: Vec<Testimonial>) -> Arc<Self> {
        let api = Self::default();
        *api.testimonials.lock().unwrap() = testimonials;
        Arc::new(api)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Create/update/delete calls only.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::CreateCourse(..)
                        | Call::UpdateCourse(..)
                        | Call::DeleteCourse(..)
                        | Call::CreateTestimonial(..)
                        | Call::UpdateTestimonial(..)
                        | Call::DeleteTestimonial(..)
                )
            })
            .collect()
    }

    pub fn fail_next_upload(&self, err: AppError) {
        *self.upload_error.lock().unwrap() = Some(err);
    }

    pub fn fail_next_mutation(&self, err: AppError) {
        *self.mutation_error.lock().unwrap() = Some(err);
    }

    pub fn fail_next_fetch(&self, err: AppError) {
        *self.fetch_error.lock().unwrap() = Some(err);
    }

    /// Make the next create/update wait until the returned handle is
    /// notified.
    pub fn hold_mutations(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn mutation(&self, call: Call) -> Result<(), AppError> {
        self.record(call);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.mutation_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fetch_result(&self) -> Result<(), AppError> {
        match self.fetch_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AcademyApi for RecordingApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        self.record(Call::FetchCourses);
        self.fetch_result()?;
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn create_course(&self, payload: &CoursePayload) -> Result<(), AppError> {
        self.mutation(Call::CreateCourse(payload.clone())).await
    }

    async fn update_course(
        &self,
        course_code: &str,
        payload: &CoursePayload,
    ) -> Result<(), AppError> {
        self.mutation(Call::UpdateCourse(course_code.to_string(), payload.clone()))
            .await
    }

    async fn delete_course(&self, course_code: &str) -> Result<(), AppError> {
        self.mutation(Call::DeleteCourse(course_code.to_string()))
            .await?;
        self.courses
            .lock()
            .unwrap()
            .retain(|c| c.course_code != course_code);
        Ok(())
    }

    async fn upload_image(&self, file: &FileUpload) -> Result<String, AppError> {
        self.record(Call::Upload(file.file_name.clone()));
        match self.upload_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(format!("https://cdn.example.com/{}", file.file_name)),
        }
    }

    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        self.record(Call::FetchTestimonials);
        self.fetch_result()?;
        Ok(self.testimonials.lock().unwrap().clone())
    }

    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<(), AppError> {
        self.mutation(Call::CreateTestimonial(payload.clone())).await
    }

    async fn update_testimonial(
        &self,
        id: &str,
        payload: &TestimonialPayload,
    ) -> Result<(), AppError> {
        self.mutation(Call::UpdateTestimonial(id.to_string(), payload.clone()))
            .await
    }

    async fn delete_testimonial(&self, id: &str) -> Result<(), AppError> {
        self.mutation(Call::DeleteTestimonial(id.to_string())).await
    }

    async fn send_contact(&self, payload: &ContactPayload) -> Result<(), AppError> {
        self.record(Call::Contact(payload.clone()));
        match self.mutation_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.record(Call::Login(request.email.clone()));
        if request.password != "secret" {
            return Err(AppError::Auth {
                message: "Invalid credentials".to_string(),
                from_server: true,
            });
        }
        Ok(auth_response("token-abc", "Asha", &request.email))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        self.record(Call::Register(request.email.clone()));
        Ok(auth_response("token-new", &request.name, &request.email))
    }
}

pub fn auth_response(token: &str, name: &str, email: &str) -> AuthResponse {
    AuthResponse {
        token: token.to_string(),
        admin: AdminProfile {
            id: Some("a1".to_string()),
            name: name.to_string(),
            email: email.to_string(),
            ..AdminProfile::default()
        },
    }
}

pub fn course(code: &str, name: &str, category: &str) -> Course {
    Course {
        category: category.to_string(),
        course_code: code.to_string(),
        course_name: name.to_string(),
        fees: Some(Fees {
            original: 100.0,
            discounted: 0.0,
            currency: "Rs.".to_string(),
        }),
        ..Course::default()
    }
}

pub fn testimonial(
    id: &str,
    name: &str,
    role: &str,
    text: &str,
    rating: u8,
    featured: bool,
) -> Testimonial {
    Testimonial {
        id: id.to_string(),
        text: text.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        rating,
        is_featured: featured,
        created_at: None,
    }
}
