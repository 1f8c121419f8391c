// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use time::{Date, Weekday};
use tokio::sync::Mutex;
use tracing::{error, info};

use squarehead_api::{
    AddDatesRequest, AddDatesResponse, ApiError, AuthenticatedActor, Clock, ClubSettings,
    CreateNextScheduleRequest,
    MemberDirectory, ReminderMailer, ReminderReport, Role, ScheduleResponse, TimezoneClock,
    UpdateAssignmentRequest, VolunteerContact, add_dates_to_next_schedule, authenticate_stub,
    clear_schedule, create_next_schedule, delete_assignment, get_schedule,
    promote_next_to_current, run_reminder_sweep, translate_domain_error, update_assignment,
};
use squarehead_domain::{DomainError, ScheduleKind, parse_club_weekday, parse_iso_date};
use squarehead_persistence::Persistence;

/// Squarehead Server - HTTP server for the Squarehead Duty Roster
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the club operates in
    #[arg(long, default_value = "America/Chicago")]
    timezone: String,

    /// Weekday the club dances on
    #[arg(long, default_value = "Wednesday")]
    club_weekday: String,

    /// Reminder lead times, in days before a dance
    #[arg(long, value_delimiter = ',', default_values_t = [7u16, 1u16])]
    reminder_offsets: Vec<u16>,

    /// Path to a JSON file with member contact records
    #[arg(long)]
    members_file: Option<String>,
}

/// Club configuration derived from command-line arguments.
struct ServerSettings {
    weekday: Weekday,
    offsets: Vec<u16>,
}

impl ClubSettings for ServerSettings {
    fn club_weekday(&self) -> Weekday {
        self.weekday
    }

    fn reminder_offsets(&self) -> Vec<u16> {
        self.offsets.clone()
    }
}

/// A member contact record as stored in the members file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemberRecord {
    /// The membership id.
    volunteer_id: i64,
    /// The member's display name.
    name: String,
    /// The member's email address.
    email: String,
}

/// Membership directory loaded once at startup from a JSON file.
struct StaticDirectory {
    contacts: HashMap<i64, VolunteerContact>,
}

impl StaticDirectory {
    fn empty() -> Self {
        Self {
            contacts: HashMap::new(),
        }
    }

    fn from_records(records: Vec<MemberRecord>) -> Self {
        let contacts: HashMap<i64, VolunteerContact> = records
            .into_iter()
            .map(|record| {
                (
                    record.volunteer_id,
                    VolunteerContact {
                        name: record.name,
                        email: record.email,
                    },
                )
            })
            .collect();
        Self { contacts }
    }

    fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let raw: String = std::fs::read_to_string(path)?;
        let records: Vec<MemberRecord> = serde_json::from_str(&raw)?;
        Ok(Self::from_records(records))
    }
}

impl MemberDirectory for StaticDirectory {
    fn resolve_volunteer(&self, volunteer_id: i64) -> Option<VolunteerContact> {
        self.contacts.get(&volunteer_id).cloned()
    }
}

/// Mailer that logs each reminder instead of sending real email.
///
/// Stands in until the club wires up an SMTP relay; the reminder
/// pipeline and reporting are exercised end to end either way.
struct LoggingMailer;

impl ReminderMailer for LoggingMailer {
    fn send_reminder(&mut self, email: &str, name: &str, dance_date: &str) -> Result<(), String> {
        info!(
            email = email,
            volunteer = name,
            dance_date = dance_date,
            "Reminder queued for delivery"
        );
        Ok(())
    }
}

/// A clock pinned to a fixed date, used when a sweep request overrides
/// "today".
struct PinnedClock(Date);

impl Clock for PinnedClock {
    fn today(&self) -> Result<Date, DomainError> {
        Ok(self.0)
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer wrapped in a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Club configuration.
    settings: Arc<ServerSettings>,
    /// Membership directory.
    directory: Arc<StaticDirectory>,
    /// Clock reporting "today" in the club's timezone.
    clock: Arc<TimezoneClock>,
}

/// API request for creating the next schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateScheduleApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The human-readable schedule name.
    name: String,
    /// The first date to cover (ISO 8601).
    start_date: String,
    /// The last date to cover (ISO 8601, inclusive).
    end_date: String,
}

/// API request for adding dates to the next schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddDatesApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The first date of the added range (ISO 8601).
    start_date: String,
    /// The last date of the added range (ISO 8601, inclusive).
    end_date: String,
}

/// API request for partially updating an assignment.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateAssignmentApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The first volunteer slot: absent keeps, null clears, a value sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    squarehead1_id: Option<Option<i64>>,
    /// The second volunteer slot: absent keeps, null clears, a value sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    squarehead2_id: Option<Option<i64>>,
    /// The night type override ("Normal" or "FifthWeek").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    night_type: Option<String>,
    /// Notes: absent keeps, null clears, a value sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Option<String>>,
}

/// API request for actions that carry only actor identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AdminActionRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// API request for running a reminder sweep.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RunRemindersApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// Optional override for "today" (ISO 8601), for backfill runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    today: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "member" => Ok(Role::Member),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid role: '{role_str}'. Must be 'admin' or 'member'"),
        }),
    }
}

/// Parses and authenticates the actor carried in a request body.
fn authenticate(actor_id: String, role_str: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(role_str)?;
    authenticate_stub(actor_id, role).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

fn schedule_not_found(kind: ScheduleKind) -> HttpError {
    HttpError {
        status: StatusCode::NOT_FOUND,
        message: format!("No active {kind} schedule"),
    }
}

/// Handler for GET `/schedule/current` endpoint.
async fn handle_get_current_schedule(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!("Handling get_current_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let schedule = get_schedule(
        &mut persistence,
        ScheduleKind::Current,
        &*app_state.directory,
    )?;
    drop(persistence);

    schedule
        .map(Json)
        .ok_or_else(|| schedule_not_found(ScheduleKind::Current))
}

/// Handler for GET `/schedule/next` endpoint.
async fn handle_get_next_schedule(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!("Handling get_next_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let schedule = get_schedule(&mut persistence, ScheduleKind::Next, &*app_state.directory)?;
    drop(persistence);

    schedule
        .map(Json)
        .ok_or_else(|| schedule_not_found(ScheduleKind::Next))
}

/// Handler for POST `/schedule/next` endpoint.
///
/// Creates the next schedule with one empty assignment per club night.
async fn handle_create_next_schedule(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateScheduleApiRequest>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        name = %req.name,
        "Handling create_next_schedule request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleResponse = create_next_schedule(
        &mut persistence,
        CreateNextScheduleRequest {
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
        },
        &actor,
        &*app_state.settings,
        &*app_state.directory,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/schedule/next/dates` endpoint.
///
/// Adds club nights in a new date range to the active next schedule.
/// The response reports the created assignments separately from the
/// full schedule.
async fn handle_add_dates(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddDatesApiRequest>,
) -> Result<Json<AddDatesResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        "Handling add_dates request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: AddDatesResponse = add_dates_to_next_schedule(
        &mut persistence,
        AddDatesRequest {
            start_date: req.start_date,
            end_date: req.end_date,
        },
        &actor,
        &*app_state.settings,
        &*app_state.directory,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}` endpoint.
///
/// Partially updates a single assignment.
async fn handle_update_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<UpdateAssignmentApiRequest>,
) -> Result<Json<squarehead_api::AssignmentResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        assignment_id,
        "Handling update_assignment request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = update_assignment(
        &mut persistence,
        assignment_id,
        UpdateAssignmentRequest {
            squarehead1_id: req.squarehead1_id,
            squarehead2_id: req.squarehead2_id,
            night_type: req.night_type,
            notes: req.notes,
        },
        &actor,
        &*app_state.directory,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}/delete` endpoint.
async fn handle_delete_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<squarehead_api::DeleteAssignmentResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        assignment_id,
        "Handling delete_assignment request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = delete_assignment(&mut persistence, assignment_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/schedule/next/promote` endpoint.
///
/// Promotes the active next schedule to current.
async fn handle_promote_schedule(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        "Handling promote_schedule request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = promote_next_to_current(&mut persistence, &actor, &*app_state.directory)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/schedule/next/clear` endpoint.
async fn handle_clear_next_schedule(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<squarehead_api::ClearScheduleResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        "Handling clear_next_schedule request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = clear_schedule(&mut persistence, ScheduleKind::Next, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/schedule/current/clear` endpoint.
async fn handle_clear_current_schedule(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<squarehead_api::ClearScheduleResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        "Handling clear_current_schedule request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = clear_schedule(&mut persistence, ScheduleKind::Current, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reminders/run` endpoint.
///
/// Runs a reminder sweep against the active current schedule.
async fn handle_run_reminders(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RunRemindersApiRequest>,
) -> Result<Json<ReminderReport>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        "Handling run_reminders request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let pinned: Option<PinnedClock> = match &req.today {
        Some(value) => Some(PinnedClock(
            parse_iso_date(value).map_err(|e| HttpError::from(translate_domain_error(e)))?,
        )),
        None => None,
    };
    let clock: &(dyn Clock + Sync) = pinned.as_ref().map_or(
        &*app_state.clock as &(dyn Clock + Sync),
        |p| p as &(dyn Clock + Sync),
    );

    let mut mailer = LoggingMailer;
    let mut persistence = app_state.persistence.lock().await;
    let report: ReminderReport = run_reminder_sweep(
        &mut persistence,
        &actor,
        &*app_state.settings,
        clock,
        &*app_state.directory,
        &mut mailer,
    )?;
    drop(persistence);

    Ok(Json(report))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/schedule/current", get(handle_get_current_schedule))
        .route("/schedule/current/clear", post(handle_clear_current_schedule))
        .route("/schedule/next", get(handle_get_next_schedule))
        .route("/schedule/next", post(handle_create_next_schedule))
        .route("/schedule/next/dates", post(handle_add_dates))
        .route("/schedule/next/promote", post(handle_promote_schedule))
        .route("/schedule/next/clear", post(handle_clear_next_schedule))
        .route("/assignments/{assignment_id}", post(handle_update_assignment))
        .route(
            "/assignments/{assignment_id}/delete",
            post(handle_delete_assignment),
        )
        .route("/reminders/run", post(handle_run_reminders))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Squarehead Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let weekday: Weekday = parse_club_weekday(&args.club_weekday)?;
    let clock: TimezoneClock = TimezoneClock::from_name(&args.timezone)?;
    let directory: StaticDirectory = match &args.members_file {
        Some(path) => {
            info!("Loading member directory from: {}", path);
            StaticDirectory::load(path)?
        }
        None => StaticDirectory::empty(),
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        settings: Arc::new(ServerSettings {
            weekday,
            offsets: args.reminder_offsets.clone(),
        }),
        directory: Arc::new(directory),
        clock: Arc::new(clock),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
