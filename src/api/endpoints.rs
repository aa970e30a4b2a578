pub const COURSES: &str = "/api/courses";
pub const COURSE_UPLOAD: &str = "/api/courses/upload";
pub const TESTIMONIALS: &str = "/api/testimonials";
pub const CONTACT: &str = "/api/contact";
pub const ADMIN_LOGIN: &str = "/api/admin/login";
pub const ADMIN_REGISTER: &str = "/api/admin/register";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub authenticated: bool,
}

const fn endpoint(
    method: &'static str,
    path: &'static str,
    description: &'static str,
    authenticated: bool,
) -> Endpoint {
    Endpoint {
        method,
        path,
        description,
        authenticated,
    }
}

/// Every backend route the dashboard talks to.
pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/api/courses", "Fetch all courses", true),
    endpoint("POST", "/api/courses", "Create new course", true),
    endpoint("PUT", "/api/courses/:courseCode", "Update course", true),
    endpoint("DELETE", "/api/courses/:courseCode", "Delete course", true),
    endpoint("POST", "/api/courses/upload", "Upload course image", true),
    endpoint("GET", "/api/testimonials", "Fetch all testimonials", true),
    endpoint("POST", "/api/testimonials", "Create testimonial", true),
    endpoint("PUT", "/api/testimonials/:id", "Update testimonial", true),
    endpoint("DELETE", "/api/testimonials/:id", "Delete testimonial", true),
    endpoint("POST", "/api/contact", "Send contact message", false),
    endpoint("POST", "/api/admin/login", "Admin login", false),
    endpoint("POST", "/api/admin/register", "Admin registration", false),
];
