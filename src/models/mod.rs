pub mod admin;
pub mod contact;
pub mod course;
pub mod testimonial;

pub use admin::{AdminProfile, AuthResponse, LoginRequest, RegisterRequest};
pub use contact::{ContactMessage, ContactPayload};
pub use course::{Course, CourseCategory, CoursePayload, Fees, SyllabusModule};
pub use testimonial::{Testimonial, TestimonialPayload};
