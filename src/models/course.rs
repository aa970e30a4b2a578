use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "Rs.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    #[serde(default)]
    pub original: f64,
    #[serde(default)]
    pub discounted: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            original: 0.0,
            discounted: 0.0,
            currency: default_currency(),
        }
    }
}

impl Fees {
    /// A discount is shown only when a non-zero discounted price undercuts
    /// the original one.
    pub fn has_discount(&self) -> bool {
        self.discounted > 0.0 && self.discounted < self.original
    }

    /// Price the catalog should advertise.
    pub fn effective(&self) -> f64 {
        if self.has_discount() {
            self.discounted
        } else {
            self.original
        }
    }

    pub fn label(&self, amount: f64) -> String {
        format!("{}{}", self.currency, amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusModule {
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub category: String,
    pub course_code: String,
    pub course_name: String,
    pub subtitle: String,
    pub description: String,
    pub details: String,
    pub preview: String,
    pub duration: String,
    pub instructor: String,
    pub image: String,
    pub banner: String,
    pub fees: Option<Fees>,
    pub skills: Vec<String>,
    pub eligibility: Vec<String>,
    pub benefits: Vec<String>,
    pub features: Vec<String>,
    pub syllabus: Vec<SyllabusModule>,
    pub students: Option<u64>,
    pub rating: Option<f64>,
}

/// One group of the catalog listing as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCategory {
    pub category: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Flatten the grouped listing into a single ordered list, stamping each
/// course with its group's category.
pub fn flatten_categories(groups: Vec<CourseCategory>) -> Vec<Course> {
    groups
        .into_iter()
        .flat_map(|group| {
            let category = group.category;
            group.courses.into_iter().map(move |mut course| {
                course.category = category.clone();
                course
            })
        })
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(courses: &[Course]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for course in courses {
        if !seen.iter().any(|c| c == &course.category) {
            seen.push(course.category.clone());
        }
    }
    seen
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub category: String,
    pub course_code: String,
    pub course_name: String,
    pub subtitle: String,
    pub description: String,
    pub details: String,
    pub preview: String,
    pub duration: String,
    pub instructor: String,
    pub image: String,
    pub banner: String,
    pub fees: Fees,
    pub skills: Vec<String>,
    pub eligibility: Vec<String>,
    pub benefits: Vec<String>,
    pub features: Vec<String>,
    pub syllabus: Vec<SyllabusModule>,
}
