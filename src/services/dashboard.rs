use serde::Serialize;
use tracing::error;

use crate::api::AcademyApi;
use crate::error::AppError;
use crate::models::{Course, Testimonial};
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub courses: usize,
    pub testimonials: usize,
    pub total_students: u64,
    /// Mean course rating with one decimal, `"0"` for an empty catalog.
    pub avg_rating: String,
}

impl DashboardStats {
    pub fn compute(courses: &[Course], testimonials: &[Testimonial]) -> Self {
        let total_students: u64 = courses.iter().filter_map(|c| c.students).sum();
        let total_rating: f64 = courses.iter().filter_map(|c| c.rating).sum();
        let avg_rating = if courses.is_empty() {
            "0".to_string()
        } else {
            format!("{:.1}", total_rating / courses.len() as f64)
        };

        Self {
            courses: courses.len(),
            testimonials: testimonials.len(),
            total_students,
            avg_rating,
        }
    }
}

/// Fetch both collections concurrently and summarize them.
pub async fn load_stats(
    api: &dyn AcademyApi,
    notifier: &dyn Notifier,
) -> Result<DashboardStats, AppError> {
    match futures::try_join!(api.fetch_courses(), api.fetch_testimonials()) {
        Ok((courses, testimonials)) => Ok(DashboardStats::compute(&courses, &testimonials)),
        Err(e) => {
            error!("Error fetching stats: {}", e);
            notifier.error("Failed to load dashboard stats");
            Err(e)
        }
    }
}
