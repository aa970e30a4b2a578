mod support;

use bms_admin::filter::{CourseCriteria, FeaturedFilter, TestimonialCriteria, filter};
use bms_admin::models::{Course, Testimonial};
use support::{course, testimonial};

fn catalog() -> Vec<Course> {
    vec![
        course("REACT-101", "Complete React Development", "Programming"),
        course("UX-200", "Product Design Basics", "Design"),
        course("NODE-110", "Node.js APIs", "Programming"),
        course("DM-300", "Digital Marketing", "Marketing"),
    ]
}

fn reviews() -> Vec<Testimonial> {
    vec![
        testimonial("t1", "Priya", "Frontend Engineer", "The React course was great", 5, true),
        testimonial("t2", "Rahul", "Student", "Loved the mentors", 4, false),
        testimonial("t3", "Meera", "Designer", "Solid design fundamentals", 5, false),
        testimonial("t4", "Arjun", "Marketing Lead", "Good pace", 3, true),
    ]
}

fn codes(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.course_code.as_str()).collect()
}

fn ids(testimonials: &[Testimonial]) -> Vec<&str> {
    testimonials.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_empty_criteria_returns_everything_in_order() {
    let courses = catalog();
    assert_eq!(filter(&courses, &CourseCriteria::default()), courses);

    let testimonials = reviews();
    assert_eq!(filter(&testimonials, &TestimonialCriteria::default()), testimonials);
}

#[test]
fn test_course_search_is_case_insensitive_across_name_code_and_category() {
    let courses = catalog();

    let by_name = filter(&courses, &CourseCriteria::from_inputs("react", ""));
    assert_eq!(codes(&by_name), vec!["REACT-101"]);

    let by_code = filter(&courses, &CourseCriteria::from_inputs("ux-2", ""));
    assert_eq!(codes(&by_code), vec!["UX-200"]);

    let by_category = filter(&courses, &CourseCriteria::from_inputs("PROGRAM", ""));
    assert_eq!(codes(&by_category), vec!["REACT-101", "NODE-110"]);
}

#[test]
fn test_search_results_always_contain_the_needle() {
    let courses = catalog();
    for needle in ["e", "De", "101", "zzz", "marketing"] {
        let lowered = needle.to_lowercase();
        for c in filter(&courses, &CourseCriteria::from_inputs(needle, "")) {
            assert!(
                [&c.course_name, &c.course_code, &c.category]
                    .iter()
                    .any(|f| f.to_lowercase().contains(&lowered)),
                "{} does not contain {}",
                c.course_code,
                needle
            );
        }
    }
}

#[test]
fn test_blank_search_is_a_no_op() {
    let courses = catalog();
    assert_eq!(filter(&courses, &CourseCriteria::from_inputs("   ", "")), courses);
}

#[test]
fn test_category_is_exact_match_and_combines_with_search() {
    let courses = catalog();

    let design = filter(&courses, &CourseCriteria::from_inputs("", "Design"));
    assert_eq!(codes(&design), vec!["UX-200"]);

    let partial = filter(&courses, &CourseCriteria::from_inputs("", "Prog"));
    assert!(partial.is_empty());

    let both = filter(&courses, &CourseCriteria::from_inputs("node", "Programming"));
    assert_eq!(codes(&both), vec!["NODE-110"]);

    let disjoint = filter(&courses, &CourseCriteria::from_inputs("react", "Design"));
    assert!(disjoint.is_empty());
}

#[test]
fn test_testimonial_search_covers_name_role_and_text() {
    let testimonials = reviews();

    assert_eq!(ids(&filter(&testimonials, &TestimonialCriteria::from_inputs("priya", "", ""))), vec!["t1"]);
    assert_eq!(ids(&filter(&testimonials, &TestimonialCriteria::from_inputs("STUDENT", "", ""))), vec!["t2"]);
    assert_eq!(ids(&filter(&testimonials, &TestimonialCriteria::from_inputs("design", "", ""))), vec!["t3"]);
}

#[test]
fn test_rating_filter_parses_and_ignores_garbage() {
    let testimonials = reviews();

    let fives = filter(&testimonials, &TestimonialCriteria::from_inputs("", "5", ""));
    assert_eq!(ids(&fives), vec!["t1", "t3"]);

    let criteria = TestimonialCriteria::from_inputs("", "five", "");
    assert_eq!(criteria.rating, None);
    assert_eq!(filter(&testimonials, &criteria), testimonials);
}

#[test]
fn test_rating_filter_reads_leading_digits() {
    assert_eq!(TestimonialCriteria::from_inputs("", "5.0", "").rating, Some(5));
    assert_eq!(TestimonialCriteria::from_inputs("", " 4abc", "").rating, Some(4));
    assert_eq!(TestimonialCriteria::from_inputs("", "", "").rating, None);
    assert_eq!(TestimonialCriteria::from_inputs("", "-3", "").rating, None);

    let fives = filter(&reviews(), &TestimonialCriteria::from_inputs("", "5.0", ""));
    assert_eq!(ids(&fives), vec!["t1", "t3"]);
}

#[test]
fn test_featured_filter() {
    let testimonials = reviews();

    assert_eq!(FeaturedFilter::parse(""), FeaturedFilter::Any);
    assert_eq!(FeaturedFilter::parse("featured"), FeaturedFilter::Featured);
    assert_eq!(FeaturedFilter::parse("regular"), FeaturedFilter::Regular);

    let featured = filter(&testimonials, &TestimonialCriteria::from_inputs("", "", "featured"));
    assert_eq!(ids(&featured), vec!["t1", "t4"]);

    let regular = filter(&testimonials, &TestimonialCriteria::from_inputs("", "", "regular"));
    assert_eq!(ids(&regular), vec!["t2", "t3"]);

    let all_three = filter(&testimonials, &TestimonialCriteria::from_inputs("react", "5", "featured"));
    assert_eq!(ids(&all_three), vec!["t1"]);
}
