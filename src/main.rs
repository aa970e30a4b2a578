use std::path::{Path, PathBuf};
use std::sync::Arc;

use bms_admin::api::{AcademyApi, ApiConfig, FileUpload, HttpAcademyApi};
use bms_admin::error::AppError;
use bms_admin::forms::CourseForm;
use bms_admin::models::{Course, Testimonial};
use bms_admin::notify::{Notifier, TracingNotifier};
use bms_admin::services::settings::{self, NOTIFICATION_OPTIONS, NotificationPreferences};
use bms_admin::services::{
    Attachments, AuthService, ContactPage, CoursesPage, TestimonialsPage, load_stats,
};
use bms_admin::session::{self, Session, SessionStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bms-admin", about = "BMS Academy admin console", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an admin account and sign in
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    Courses {
        #[command(subcommand)]
        action: CourseAction,
    },
    Testimonials {
        #[command(subcommand)]
        action: TestimonialAction,
    },
    /// Send a test message through the public contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
    },
    Dashboard,
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum CourseAction {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    Delete {
        course_code: String,
    },
    /// Create a course from a JSON form file, or update one with --edit
    Save {
        #[arg(long)]
        form: Option<PathBuf>,
        #[arg(long, value_name = "COURSE_CODE")]
        edit: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        banner: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum TestimonialAction {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        rating: String,
        /// "featured" or "regular"
        #[arg(long, default_value = "")]
        featured: String,
    },
    Delete {
        id: String,
    },
    Save {
        #[arg(long, value_name = "ID")]
        edit: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        featured: Option<bool>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    Endpoints,
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    Notifications {
        /// Option key to flip, e.g. weeklyReports
        #[arg(long)]
        toggle: Option<String>,
    },
}

struct Context {
    api: Arc<dyn AcademyApi>,
    notifier: Arc<dyn Notifier>,
    store: SessionStore,
    auth: AuthService,
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bms_admin=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ApiConfig::new_from_env()?;
    let database_url = std::env::var("BMS_SESSION_DB")
        .unwrap_or_else(|_| "sqlite://bms-admin.db?mode=rwc".to_string());

    let store = SessionStore::connect(&database_url).await?;
    let session = session::shared(Session::Anonymous);
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let base_url = config.base_url.clone();
    let api: Arc<dyn AcademyApi> = Arc::new(HttpAcademyApi::new(config, session.clone())?);
    let auth = AuthService::new(api.clone(), store.clone(), session, notifier.clone());
    auth.restore().await?;

    let ctx = Context {
        api,
        notifier,
        store,
        auth,
        base_url,
    };
    run(cli.command, &ctx).await?;
    Ok(())
}

async fn run(command: Command, ctx: &Context) -> Result<(), AppError> {
    match command {
        Command::Login { email, password } => {
            let admin = ctx.auth.login(&email, &password).await?;
            println!("Signed in as {} <{}>", admin.name, admin.email);
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let admin = ctx.auth.register(&name, &email, &password).await?;
            println!("Registered and signed in as {} <{}>", admin.name, admin.email);
        }
        Command::Logout => {
            ctx.auth.logout().await?;
            println!("Signed out");
        }
        Command::Whoami => match ctx.auth.current().await.admin() {
            Some(admin) => println!("{} <{}>", admin.name, admin.email),
            None => println!("Not signed in"),
        },
        Command::Courses { action } => run_courses(action, ctx).await?,
        Command::Testimonials { action } => run_testimonials(action, ctx).await?,
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let mut page = ContactPage::new(ctx.api.clone(), ctx.notifier.clone());
            let form = page.form_mut();
            form.name = name;
            form.email = email;
            form.subject = subject.unwrap_or_default();
            form.message = message;
            let sent = page.send().await?;
            println!("Sent at {} ({})", sent.timestamp.to_rfc3339(), sent.id);
        }
        Command::Dashboard => {
            let stats = load_stats(ctx.api.as_ref(), ctx.notifier.as_ref()).await?;
            println!("Total courses:  {}", stats.courses);
            println!("Testimonials:   {}", stats.testimonials);
            println!("Total students: {}", stats.total_students);
            println!("Average rating: {}", stats.avg_rating);
        }
        Command::Settings { action } => run_settings(action, ctx).await?,
    }
    Ok(())
}

async fn run_courses(action: CourseAction, ctx: &Context) -> Result<(), AppError> {
    let mut page = CoursesPage::new(ctx.api.clone(), ctx.notifier.clone());
    page.refresh().await?;

    match action {
        CourseAction::List { search, category } => {
            page.apply_filters(&search, &category);
            for course in page.visible() {
                print_course(course);
            }
            let count = page.visible().len();
            println!(
                "{} course{} found (categories: {})",
                count,
                if count == 1 { "" } else { "s" },
                page.categories().join(", ")
            );
        }
        CourseAction::Delete { course_code } => page.delete(&course_code).await?,
        CourseAction::Save {
            form,
            edit,
            image,
            banner,
        } => {
            let from_file = form.as_deref().map(read_course_form).transpose()?;
            match &edit {
                Some(course_code) => page.open_edit(course_code)?,
                None => page.open_create(),
            }
            if let (Some(mut replacement), Some(current)) = (from_file, page.form_mut()) {
                if replacement.image.is_empty() {
                    replacement.image = current.image.clone();
                }
                if replacement.banner.is_empty() {
                    replacement.banner = current.banner.clone();
                }
                *current = replacement;
            }

            let attachments = Attachments {
                image: image.as_deref().map(read_upload).transpose()?,
                banner: banner.as_deref().map(read_upload).transpose()?,
            };
            let outcome = page.submit(&attachments).await?;
            println!("{:?}; catalog now has {} courses", outcome, page.all().len());
        }
    }
    Ok(())
}

async fn run_testimonials(action: TestimonialAction, ctx: &Context) -> Result<(), AppError> {
    let mut page = TestimonialsPage::new(ctx.api.clone(), ctx.notifier.clone());
    page.refresh().await?;

    match action {
        TestimonialAction::List {
            search,
            rating,
            featured,
        } => {
            page.apply_filters(&search, &rating, &featured);
            for testimonial in page.visible() {
                print_testimonial(testimonial);
            }
            println!("{} testimonials shown", page.visible().len());
        }
        TestimonialAction::Delete { id } => page.delete(&id).await?,
        TestimonialAction::Save {
            edit,
            text,
            name,
            role,
            rating,
            featured,
        } => {
            match &edit {
                Some(id) => page.open_edit(id)?,
                None => page.open_create(),
            }
            if let Some(form) = page.form_mut() {
                if let Some(text) = text {
                    form.text = text;
                }
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(role) = role {
                    form.role = role;
                }
                if let Some(rating) = rating {
                    form.rating = rating;
                }
                if let Some(featured) = featured {
                    form.is_featured = featured;
                }
            }
            let outcome = page.submit().await?;
            println!("{:?}; {} testimonials", outcome, page.all().len());
        }
    }
    Ok(())
}

async fn run_settings(action: SettingsAction, ctx: &Context) -> Result<(), AppError> {
    match action {
        SettingsAction::Endpoints => {
            println!("API base URL: {}", ctx.base_url);
            println!("API version:  {}", settings::API_VERSION);
            for endpoint in settings::endpoint_catalog() {
                println!(
                    "{:<6} {:<28} {}",
                    endpoint.method, endpoint.path, endpoint.description
                );
            }
        }
        SettingsAction::Password {
            current,
            new,
            confirm,
        } => {
            let change = settings::PasswordChange {
                current_password: current,
                new_password: new,
                confirm_password: confirm,
            };
            settings::change_password(&change, ctx.notifier.as_ref())?;
        }
        SettingsAction::Notifications { toggle } => {
            let preferences = match toggle {
                Some(key) => {
                    settings::toggle_notification(&ctx.store, &key, ctx.notifier.as_ref()).await?
                }
                None => NotificationPreferences::load(&ctx.store).await?,
            };
            for option in NOTIFICATION_OPTIONS {
                let on = preferences.get(option.key).unwrap_or(false);
                println!(
                    "[{}] {:<20} {}",
                    if on { "x" } else { " " },
                    option.label,
                    option.description
                );
            }
        }
    }
    Ok(())
}

fn read_course_form(path: &Path) -> Result<CourseForm, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&raw)?)
}

fn read_upload(path: &Path) -> Result<FileUpload, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(FileUpload::from_path_bytes(path, bytes))
}

fn print_course(course: &Course) {
    let price = match &course.fees {
        Some(fees) if fees.has_discount() => format!(
            "{} (was {})",
            fees.label(fees.discounted),
            fees.label(fees.original)
        ),
        Some(fees) => fees.label(fees.original),
        None => "-".to_string(),
    };
    let duration = if course.duration.is_empty() {
        "Duration not set"
    } else {
        course.duration.as_str()
    };
    println!(
        "{:<12} {:<36} {:<16} {:<16} {} students  {}",
        course.course_code,
        course.course_name,
        course.category,
        duration,
        course.students.unwrap_or(0),
        price
    );
}

fn print_testimonial(testimonial: &Testimonial) {
    let stars: String = "*".repeat(usize::from(testimonial.rating.min(5)));
    println!(
        "{}  {:<5} {}{} - {}: {}",
        testimonial.id,
        stars,
        testimonial.name,
        if testimonial.is_featured { " [featured]" } else { "" },
        testimonial.role,
        testimonial.text
    );
}
