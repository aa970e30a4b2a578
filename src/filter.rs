//! Client-side list filtering.
//!
//! Every criterion is optional. Active criteria are ANDed, and the result
//! keeps the input order.

use crate::models::{Course, Testimonial};

pub trait Filterable {
    type Criteria: Default;

    fn matches(&self, criteria: &Self::Criteria) -> bool;
}

pub fn filter<T>(items: &[T], criteria: &T::Criteria) -> Vec<T>
where
    T: Filterable + Clone,
{
    items
        .iter()
        .filter(|item| item.matches(criteria))
        .cloned()
        .collect()
}

/// Normalized search text. Blank input matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchText(Option<String>);

impl SearchText {
    pub fn new(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(raw.to_lowercase()))
        }
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn matches_any(&self, fields: &[&str]) -> bool {
        match &self.0 {
            None => true,
            Some(needle) => fields
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseCriteria {
    pub search: SearchText,
    pub category: Option<String>,
}

impl CourseCriteria {
    pub fn from_inputs(search: &str, category: &str) -> Self {
        Self {
            search: SearchText::new(search),
            category: (!category.is_empty()).then(|| category.to_string()),
        }
    }
}

impl Filterable for Course {
    type Criteria = CourseCriteria;

    fn matches(&self, criteria: &CourseCriteria) -> bool {
        if !criteria
            .search
            .matches_any(&[&self.course_name, &self.course_code, &self.category])
        {
            return false;
        }
        match &criteria.category {
            Some(category) => &self.category == category,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeaturedFilter {
    #[default]
    Any,
    Featured,
    Regular,
}

impl FeaturedFilter {
    /// `"featured"` selects featured entries, any other non-empty value
    /// selects the rest.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => FeaturedFilter::Any,
            "featured" => FeaturedFilter::Featured,
            _ => FeaturedFilter::Regular,
        }
    }

    fn accepts(self, is_featured: bool) -> bool {
        match self {
            FeaturedFilter::Any => true,
            FeaturedFilter::Featured => is_featured,
            FeaturedFilter::Regular => !is_featured,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialCriteria {
    pub search: SearchText,
    pub rating: Option<u8>,
    pub featured: FeaturedFilter,
}

impl TestimonialCriteria {
    /// Build criteria from raw selector values. The rating is read from its
    /// leading digits (`"5.0"` is 5); input without any is no rating filter.
    pub fn from_inputs(search: &str, rating: &str, featured: &str) -> Self {
        Self {
            search: SearchText::new(search),
            rating: leading_rating(rating),
            featured: FeaturedFilter::parse(featured),
        }
    }
}

fn leading_rating(raw: &str) -> Option<u8> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

impl Filterable for Testimonial {
    type Criteria = TestimonialCriteria;

    fn matches(&self, criteria: &TestimonialCriteria) -> bool {
        criteria
            .search
            .matches_any(&[&self.name, &self.role, &self.text])
            && criteria.rating.is_none_or(|rating| self.rating == rating)
            && criteria.featured.accepts(self.is_featured)
    }
}
