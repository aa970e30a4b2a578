//! Editable form state and its conversion into request payloads.
//!
//! Form fields are kept as the raw strings a user typed. Conversion into
//! payloads never fails: list fields are split on commas and numeric
//! fields fall back to zero.

use serde::{Deserialize, Serialize};

use crate::models::course::DEFAULT_CURRENCY;
use crate::models::{
    ContactPayload, Course, CoursePayload, Fees, SyllabusModule, Testimonial, TestimonialPayload,
};

/// Split a comma separated edit buffer into trimmed, non-empty items.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_csv(items: &[String]) -> String {
    items.join(", ")
}

/// Parse a user-typed amount. Anything unparseable counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn format_amount(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn missing(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesForm {
    pub original: String,
    pub discounted: String,
}

impl FeesForm {
    pub fn to_fees(&self) -> Fees {
        Fees {
            original: parse_amount(&self.original),
            discounted: parse_amount(&self.discounted),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// A syllabus row while it is being edited. Topics stay a single string
/// until the row is committed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyllabusModuleForm {
    pub module: String,
    pub topics: String,
    pub duration: String,
}

impl SyllabusModuleForm {
    pub fn from_module(module: &SyllabusModule) -> Self {
        Self {
            module: module.module.clone(),
            topics: join_csv(&module.topics),
            duration: module.duration.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.module.trim().is_empty()
    }

    pub fn commit(&self) -> SyllabusModule {
        SyllabusModule {
            module: self.module.clone(),
            topics: split_csv(&self.topics),
            duration: self.duration.clone(),
        }
    }
}

/// Also the shape of the JSON form file the CLI reads, using the same
/// camelCase keys as the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseForm {
    pub category: String,
    pub course_code: String,
    pub course_name: String,
    pub subtitle: String,
    pub description: String,
    pub details: String,
    pub preview: String,
    pub duration: String,
    pub instructor: String,
    /// Already-hosted image URL, replaced when a new file is uploaded.
    pub image: String,
    pub banner: String,
    pub fees: FeesForm,
    pub skills: String,
    pub eligibility: String,
    pub benefits: String,
    pub features: String,
    pub syllabus: Vec<SyllabusModuleForm>,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            category: String::new(),
            course_code: String::new(),
            course_name: String::new(),
            subtitle: String::new(),
            description: String::new(),
            details: String::new(),
            preview: String::new(),
            duration: String::new(),
            instructor: String::new(),
            image: String::new(),
            banner: String::new(),
            fees: FeesForm::default(),
            skills: String::new(),
            eligibility: String::new(),
            benefits: String::new(),
            features: String::new(),
            syllabus: vec![SyllabusModuleForm::default()],
        }
    }
}

impl CourseForm {
    /// Prefill a form for editing an existing course.
    pub fn from_course(course: &Course) -> Self {
        let fees = course.fees.clone().unwrap_or_default();
        let mut syllabus: Vec<SyllabusModuleForm> = course
            .syllabus
            .iter()
            .map(SyllabusModuleForm::from_module)
            .collect();
        if syllabus.is_empty() {
            syllabus.push(SyllabusModuleForm::default());
        }

        Self {
            category: course.category.clone(),
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            subtitle: course.subtitle.clone(),
            description: course.description.clone(),
            details: course.details.clone(),
            preview: course.preview.clone(),
            duration: course.duration.clone(),
            instructor: course.instructor.clone(),
            image: course.image.clone(),
            banner: course.banner.clone(),
            fees: FeesForm {
                original: format_amount(fees.original),
                discounted: format_amount(fees.discounted),
            },
            skills: join_csv(&course.skills),
            eligibility: join_csv(&course.eligibility),
            benefits: join_csv(&course.benefits),
            features: join_csv(&course.features),
            syllabus,
        }
    }

    /// Re-open a form from a payload it produced.
    pub fn from_payload(payload: &CoursePayload) -> Self {
        Self::from_course(&Course {
            category: payload.category.clone(),
            course_code: payload.course_code.clone(),
            course_name: payload.course_name.clone(),
            subtitle: payload.subtitle.clone(),
            description: payload.description.clone(),
            details: payload.details.clone(),
            preview: payload.preview.clone(),
            duration: payload.duration.clone(),
            instructor: payload.instructor.clone(),
            image: payload.image.clone(),
            banner: payload.banner.clone(),
            fees: Some(payload.fees.clone()),
            skills: payload.skills.clone(),
            eligibility: payload.eligibility.clone(),
            benefits: payload.benefits.clone(),
            features: payload.features.clone(),
            syllabus: payload.syllabus.clone(),
            students: None,
            rating: None,
        })
    }

    pub fn add_module(&mut self) {
        self.syllabus.push(SyllabusModuleForm::default());
    }

    pub fn remove_module(&mut self, index: usize) -> Option<SyllabusModuleForm> {
        (index < self.syllabus.len()).then(|| self.syllabus.remove(index))
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        missing(&[
            ("category", &self.category),
            ("courseCode", &self.course_code),
            ("courseName", &self.course_name),
        ])
    }

    pub fn to_payload(&self) -> CoursePayload {
        CoursePayload {
            category: self.category.clone(),
            course_code: self.course_code.clone(),
            course_name: self.course_name.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            details: self.details.clone(),
            preview: self.preview.clone(),
            duration: self.duration.clone(),
            instructor: self.instructor.clone(),
            image: self.image.clone(),
            banner: self.banner.clone(),
            fees: self.fees.to_fees(),
            skills: split_csv(&self.skills),
            eligibility: split_csv(&self.eligibility),
            benefits: split_csv(&self.benefits),
            features: split_csv(&self.features),
            syllabus: self
                .syllabus
                .iter()
                .filter(|module| !module.is_blank())
                .map(SyllabusModuleForm::commit)
                .collect(),
        }
    }
}

pub const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialForm {
    pub text: String,
    pub name: String,
    pub role: String,
    pub rating: u8,
    pub is_featured: bool,
}

impl Default for TestimonialForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            name: String::new(),
            role: String::new(),
            rating: DEFAULT_RATING,
            is_featured: false,
        }
    }
}

impl TestimonialForm {
    pub fn from_testimonial(testimonial: &Testimonial) -> Self {
        Self {
            text: testimonial.text.clone(),
            name: testimonial.name.clone(),
            role: testimonial.role.clone(),
            rating: testimonial.rating,
            is_featured: testimonial.is_featured,
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        missing(&[("text", &self.text), ("name", &self.name)])
    }

    pub fn to_payload(&self) -> TestimonialPayload {
        TestimonialPayload {
            text: self.text.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
            rating: self.rating.clamp(1, 5),
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn missing_required(&self) -> Vec<&'static str> {
        missing(&[
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ])
    }

    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: (!self.subject.trim().is_empty()).then(|| self.subject.clone()),
            message: self.message.clone(),
        }
    }
}
