use bms_admin::forms::{
    ContactForm, CourseForm, FeesForm, SyllabusModuleForm, TestimonialForm, parse_amount,
    split_csv,
};
use bms_admin::models::{Course, Fees, SyllabusModule};

#[test]
fn test_split_csv_trims_and_drops_empty_items() {
    assert_eq!(split_csv("a, b ,, c"), vec!["a", "b", "c"]);
    assert_eq!(split_csv(""), Vec::<String>::new());
    assert_eq!(split_csv(" , ,"), Vec::<String>::new());
    assert_eq!(split_csv("Git,  Docker"), vec!["Git", "Docker"]);
}

#[test]
fn test_parse_amount_defaults_to_zero() {
    assert_eq!(parse_amount(""), 0.0);
    assert_eq!(parse_amount("abc"), 0.0);
    assert_eq!(parse_amount("NaN"), 0.0);
    assert_eq!(parse_amount(" 1499.5 "), 1499.5);
}

#[test]
fn test_new_course_payload() {
    let form = CourseForm {
        category: "Programming".to_string(),
        course_code: "MERN-01".to_string(),
        course_name: "MERN Stack".to_string(),
        skills: "React, Node".to_string(),
        eligibility: "Graduates, , Final-year students".to_string(),
        fees: FeesForm {
            original: "100".to_string(),
            discounted: String::new(),
        },
        ..CourseForm::default()
    };

    let payload = form.to_payload();
    assert_eq!(payload.skills, vec!["React", "Node"]);
    assert_eq!(payload.eligibility, vec!["Graduates", "Final-year students"]);
    assert!(payload.benefits.is_empty());
    assert_eq!(
        payload.fees,
        Fees {
            original: 100.0,
            discounted: 0.0,
            currency: "Rs.".to_string(),
        }
    );

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["courseCode"], "MERN-01");
    assert_eq!(json["fees"]["original"], 100.0);
    assert_eq!(json["fees"]["currency"], "Rs.");
    assert_eq!(json["skills"], serde_json::json!(["React", "Node"]));
}

#[test]
fn test_blank_syllabus_modules_are_dropped() {
    let form = CourseForm {
        syllabus: vec![
            SyllabusModuleForm {
                module: "  ".to_string(),
                topics: "ignored".to_string(),
                duration: "1 week".to_string(),
            },
            SyllabusModuleForm {
                module: "Hooks".to_string(),
                topics: "useState, useEffect,, ".to_string(),
                duration: "2 weeks".to_string(),
            },
        ],
        ..CourseForm::default()
    };

    let payload = form.to_payload();
    assert_eq!(
        payload.syllabus,
        vec![SyllabusModule {
            module: "Hooks".to_string(),
            topics: vec!["useState".to_string(), "useEffect".to_string()],
            duration: "2 weeks".to_string(),
        }]
    );
}

#[test]
fn test_default_form_has_one_blank_module_and_empty_payload_syllabus() {
    let form = CourseForm::default();
    assert_eq!(form.syllabus.len(), 1);
    assert!(form.to_payload().syllabus.is_empty());
}

#[test]
fn test_mapper_is_idempotent_through_the_form() {
    let form = CourseForm {
        category: "Design".to_string(),
        course_code: "UX-1".to_string(),
        course_name: "UX".to_string(),
        skills: " Figma ,, Research".to_string(),
        features: "Live sessions".to_string(),
        fees: FeesForm {
            original: "2500".to_string(),
            discounted: "oops".to_string(),
        },
        syllabus: vec![
            SyllabusModuleForm {
                module: "Intro".to_string(),
                topics: "a, b".to_string(),
                duration: "1w".to_string(),
            },
            SyllabusModuleForm::default(),
        ],
        ..CourseForm::default()
    };

    let first = form.to_payload();
    let second = CourseForm::from_payload(&first).to_payload();
    assert_eq!(first, second);
}

#[test]
fn test_prefill_from_existing_course() {
    let course = Course {
        category: "Programming".to_string(),
        course_code: "REACT-101".to_string(),
        course_name: "React".to_string(),
        image: "https://cdn/img.png".to_string(),
        skills: vec!["React".to_string(), "Redux".to_string()],
        fees: Some(Fees {
            original: 4999.0,
            discounted: 0.0,
            currency: "Rs.".to_string(),
        }),
        syllabus: vec![SyllabusModule {
            module: "Basics".to_string(),
            topics: vec!["JSX".to_string(), "Props".to_string()],
            duration: "1 week".to_string(),
        }],
        ..Course::default()
    };

    let form = CourseForm::from_course(&course);
    assert_eq!(form.skills, "React, Redux");
    assert_eq!(form.fees.original, "4999");
    assert_eq!(form.fees.discounted, "");
    assert_eq!(form.image, "https://cdn/img.png");
    assert_eq!(form.syllabus[0].topics, "JSX, Props");
    assert_eq!(form.to_payload().syllabus, course.syllabus);
}

#[test]
fn test_syllabus_rows_can_be_added_and_removed() {
    let mut form = CourseForm::default();
    form.add_module();
    form.syllabus[1].module = "Second".to_string();
    assert_eq!(form.syllabus.len(), 2);

    let removed = form.remove_module(0).unwrap();
    assert!(removed.is_blank());
    assert_eq!(form.syllabus[0].module, "Second");
    assert!(form.remove_module(5).is_none());
}

#[test]
fn test_required_fields() {
    let form = CourseForm {
        course_code: "X".to_string(),
        ..CourseForm::default()
    };
    assert_eq!(form.missing_required(), vec!["category", "courseName"]);

    let testimonial = TestimonialForm::default();
    assert_eq!(testimonial.missing_required(), vec!["text", "name"]);

    let contact = ContactForm {
        name: "A".to_string(),
        email: "a@example.com".to_string(),
        ..ContactForm::default()
    };
    assert_eq!(contact.missing_required(), vec!["message"]);
}

#[test]
fn test_testimonial_payload_defaults_and_clamps_rating() {
    let form = TestimonialForm::default();
    assert_eq!(form.to_payload().rating, 5);
    assert!(!form.to_payload().is_featured);

    let form = TestimonialForm {
        rating: 9,
        ..TestimonialForm::default()
    };
    assert_eq!(form.to_payload().rating, 5);

    let form = TestimonialForm {
        rating: 0,
        is_featured: true,
        ..TestimonialForm::default()
    };
    let payload = form.to_payload();
    assert_eq!(payload.rating, 1);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["isFeatured"], true);
}

#[test]
fn test_contact_subject_is_optional() {
    let form = ContactForm {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        subject: "   ".to_string(),
        message: "Hello".to_string(),
    };
    let json = serde_json::to_value(form.to_payload()).unwrap();
    assert!(json.get("subject").is_none());
    assert_eq!(json["message"], "Hello");
}

#[test]
fn test_discount_display_rule() {
    let mut fees = Fees {
        original: 1000.0,
        discounted: 800.0,
        currency: "Rs.".to_string(),
    };
    assert!(fees.has_discount());
    assert_eq!(fees.label(fees.effective()), "Rs.800");

    fees.discounted = 1200.0;
    assert!(!fees.has_discount());
    assert_eq!(fees.effective(), 1000.0);

    fees.discounted = 0.0;
    assert!(!fees.has_discount());
}

#[test]
fn test_course_form_reads_camel_case_json() {
    let form: CourseForm = serde_json::from_str(
        r#"{
            "category": "Programming",
            "courseCode": "RUST-1",
            "courseName": "Rust",
            "skills": "Ownership, Traits",
            "fees": { "original": "4999", "discounted": "3999" },
            "syllabus": [{ "module": "Basics", "topics": "cargo, crates", "duration": "1 week" }]
        }"#,
    )
    .unwrap();

    assert!(form.missing_required().is_empty());
    let payload = form.to_payload();
    assert_eq!(payload.skills, vec!["Ownership", "Traits"]);
    assert!(payload.fees.has_discount());
    assert_eq!(payload.syllabus[0].topics, vec!["cargo", "crates"]);
}
