pub mod attendance;
pub mod auth;
pub mod config;
pub mod coursework;
pub mod db;
pub mod error;
pub mod extract;
pub mod formats;
pub mod gpa;
pub mod groups;
pub mod models;
pub mod query;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod validation;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use attendance::AttendanceRepository;
use auth::{AuthService, TokenService, UserRepository};
use config::Config;
use coursework::CourseworkRepository;
use gpa::{GpaRepository, GpaService};
use groups::GroupRepository;
use schedules::ScheduleRepository;
use students::StudentRepository;
use subjects::SubjectRepository;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::me_handler,
        students::handlers::list_students,
        students::handlers::get_student,
        students::handlers::create_student,
        students::handlers::update_student,
        students::handlers::delete_student,
        gpa::handlers::student_gpa,
        gpa::handlers::student_subject_gpa,
        gpa::handlers::rankings,
        groups::list_groups,
        subjects::list_subjects,
        schedules::handlers::list_schedules,
        schedules::handlers::get_schedule,
        schedules::handlers::create_schedule,
        schedules::handlers::update_schedule,
        schedules::handlers::delete_schedule,
        attendance::handlers::list_attendance,
        attendance::handlers::create_attendance,
        attendance::handlers::update_attendance,
        attendance::handlers::delete_attendance,
        coursework::handlers::list_assignments,
        coursework::handlers::create_assignment,
        coursework::handlers::create_grade,
    ),
    components(
        schemas(
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::RegisterResponse,
            auth::TokenResponse,
            auth::UserResponse,
            error::ErrorResponse,
            models::CreatedResponse,
            students::Student,
            students::StudentWithGroup,
            students::CreateStudent,
            students::UpdateStudent,
            groups::Group,
            subjects::Subject,
            schedules::Schedule,
            schedules::CreateSchedule,
            schedules::UpdateSchedule,
            attendance::Attendance,
            attendance::CreateAttendance,
            attendance::UpdateAttendance,
            coursework::Assignment,
            coursework::CreateAssignment,
            coursework::CreateGrade,
            gpa::GpaResponse,
            gpa::StudentGpa,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and the current user"),
        (name = "students", description = "Student records"),
        (name = "gpa", description = "Weighted GPA and rankings"),
        (name = "groups", description = "Student groups"),
        (name = "subjects", description = "Subjects"),
        (name = "schedules", description = "Class schedule"),
        (name = "attendance", description = "Attendance records"),
        (name = "coursework", description = "Assignments and grades"),
    ),
    info(
        title = "Academic Records API",
        version = "1.0.0",
        description = "Students, coursework, attendance and weighted GPA behind bearer-token auth"
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub students: StudentRepository,
    pub groups: GroupRepository,
    pub subjects: SubjectRepository,
    pub schedules: ScheduleRepository,
    pub attendance: AttendanceRepository,
    pub coursework: CourseworkRepository,
    pub gpa: GpaService,
}

impl AppState {
    /// Wire every repository and service onto one pool
    pub fn new(db: PgPool, config: &Config) -> Self {
        let token_service = Arc::new(TokenService::new(
            &config.jwt_secret,
            config.token_ttl_seconds,
        ));
        let auth_service = Arc::new(AuthService::new(
            UserRepository::new(db.clone()),
            token_service.clone(),
        ));

        let students = StudentRepository::new(db.clone());
        let subjects = SubjectRepository::new(db.clone());
        let gpa = GpaService::new(
            GpaRepository::new(db.clone()),
            students.clone(),
            subjects.clone(),
        );

        Self {
            auth_service,
            token_service,
            students,
            groups: GroupRepository::new(db.clone()),
            subjects,
            schedules: ScheduleRepository::new(db.clone()),
            attendance: AttendanceRepository::new(db.clone()),
            coursework: CourseworkRepository::new(db),
            gpa,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparsable CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Creates and configures the application router
///
/// Everything except registration, login and the docs sits behind
/// `require_auth`.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let protected = Router::new()
        .route("/users/me", get(auth::me_handler))
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/:id",
            get(students::get_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route("/students/:id/gpa", get(gpa::student_gpa))
        .route(
            "/students/:id/subjects/:subject_id/gpa",
            get(gpa::student_subject_gpa),
        )
        .route("/groups", get(groups::list_groups))
        .route("/subjects", get(subjects::list_subjects))
        .route(
            "/schedules",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route(
            "/schedules/:id",
            get(schedules::get_schedule)
                .patch(schedules::update_schedule)
                .delete(schedules::delete_schedule),
        )
        .route(
            "/attendance",
            get(attendance::list_attendance).post(attendance::create_attendance),
        )
        .route(
            "/attendance/:id",
            axum::routing::patch(attendance::update_attendance)
                .delete(attendance::delete_attendance),
        )
        .route(
            "/assignments",
            get(coursework::list_assignments).post(coursework::create_assignment),
        )
        .route("/grades", post(coursework::create_grade))
        .route("/rankings", get(gpa::rankings))
        .route_layer(from_fn_with_state(
            state.token_service.clone(),
            auth::require_auth,
        ));

    let public = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Academic Records API - Starting...");

    let config = Config::from_env().expect("Invalid configuration");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let state = AppState::new(db_pool, &config);
    let app = create_router(state, &config.cors_allowed_origins);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
