#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use handlebars::Handlebars;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::chart::ChartSpec;
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::graph::{GraphOptions, render_stacked_svg};
use crate::page::{PageContext, PageQuery, build_page};

pub struct AppState {
    dashboard: Dashboard,
    templates: Handlebars<'static>,
    header: Header,
}

/// Header images found in the static directory at startup
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct Header {
    pub logo: Option<String>,
    pub flag: Option<String>,
}

impl Header {
    pub const LOGO_FILE: &'static str = "logo.png";
    pub const FLAG_FILE: &'static str = "flag.png";

    /// Links only the images that exist, so a bare static directory
    /// renders a text-only header.
    pub fn discover(static_dir: &Path) -> Self {
        let link = |file: &str| {
            if static_dir.join(file).is_file() {
                Some(format!("/static/{}", file))
            } else {
                debug!("no {} in {}", file, static_dir.display());
                None
            }
        };
        Header {
            logo: link(Self::LOGO_FILE),
            flag: link(Self::FLAG_FILE),
        }
    }
}

/// Template context of the dashboard page
#[derive(Serialize)]
struct PageView<'a> {
    #[serde(flatten)]
    page: PageContext,
    header: &'a Header,
}

impl AppState {
    pub fn new(dashboard: Dashboard, static_dir: &Path) -> Result<Self, DashboardError> {
        let mut templates = Handlebars::new();
        templates
            .register_template_string("dashboard", include_str!("./static/dashboard.hbs"))
            .map_err(|e| DashboardError::Template(e.to_string()))?;

        Ok(AppState {
            dashboard,
            templates,
            header: Header::discover(static_dir),
        })
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}

#[derive(Deserialize)]
struct PrimaryQuery {
    category: Option<String>,
    scenario: Option<String>,
}

#[derive(Deserialize)]
struct CountryQuery {
    country: Option<String>,
    exporter: Option<String>,
}

#[derive(Deserialize)]
struct ExportersQuery {
    country: Option<String>,
}

/// A query parameter the endpoint cannot do without
fn required(value: Option<String>, name: &'static str) -> Result<String, ApiError> {
    value.ok_or(ApiError(DashboardError::MissingParameter(name)))
}

impl PrimaryQuery {
    fn selection(self) -> Result<(String, String), ApiError> {
        Ok((
            required(self.category, "category")?,
            required(self.scenario, "scenario")?,
        ))
    }
}

impl CountryQuery {
    fn selection(self) -> Result<(String, String), ApiError> {
        Ok((
            required(self.country, "country")?,
            required(self.exporter, "exporter")?,
        ))
    }
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

/// A failed chart request, answered as JSON
struct ApiError(DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            DashboardError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            DashboardError::MalformedLayout(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{}", self.0);
        }

        (
            status,
            Json(StatusResponse {
                status: "error".to_string(),
                message: Some(self.0.to_string()),
            }),
        )
            .into_response()
    }
}

pub async fn run(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::new(&config);
    dashboard.check_workbooks();

    // Setup app state
    let state = Arc::new(AppState::new(dashboard, &config.static_dir)?);
    let app = router(state, &config.static_dir);

    // Start server
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/scenarios", get(get_scenarios))
        .route("/api/exporters", get(get_exporters))
        .route("/api/chart/primary", get(get_primary_chart))
        .route("/api/chart/country", get(get_country_chart))
        .route("/chart/primary.svg", get(primary_svg))
        .route("/chart/country.svg", get(country_svg))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Runs blocking workbook access off the async workers
async fn blocking<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Dashboard) -> Result<T, DashboardError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(&state.dashboard))
        .await
        .map_err(|e| ApiError(DashboardError::Render(e.to_string())))?
        .map_err(ApiError)
}

async fn serve_dashboard(
    Query(params): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let page_state = Arc::clone(&state);
    let page = tokio::task::spawn_blocking(move || build_page(&page_state.dashboard, &params)).await;

    let rendered = page
        .map_err(|e| DashboardError::Render(e.to_string()))
        .and_then(|page| {
            let view = PageView {
                page,
                header: &state.header,
            };
            state
                .templates
                .render("dashboard", &view)
                .map_err(|e| DashboardError::Template(e.to_string()))
        });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn get_scenarios(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = &state.dashboard;
    Json(serde_json::json!({
        "primary": dashboard.scenarios(),
        "countries": dashboard.imports().countries().collect::<Vec<_>>(),
    }))
}

async fn get_exporters(
    Query(params): Query<ExportersQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let country = required(params.country, "country")?;
    let exporters = blocking(&state, move |d| d.exporters(&country)).await?;
    Ok(Json(exporters.as_ref().clone()))
}

async fn get_primary_chart(
    Query(params): Query<PrimaryQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSpec>, ApiError> {
    let (category, scenario) = params.selection()?;
    let chart = blocking(&state, move |d| d.primary_chart(&category, &scenario)).await?;
    Ok(Json(chart))
}

async fn get_country_chart(
    Query(params): Query<CountryQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSpec>, ApiError> {
    let (country, exporter) = params.selection()?;
    let chart = blocking(&state, move |d| d.country_chart(&country, &exporter)).await?;
    Ok(Json(chart))
}

async fn primary_svg(
    Query(params): Query<PrimaryQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let (category, scenario) = params.selection()?;
    let svg = blocking(&state, move |d| {
        let chart = d.primary_chart(&category, &scenario)?;
        render_stacked_svg(&chart, &GraphOptions::default())
    })
    .await?;
    Ok(svg_response(svg))
}

async fn country_svg(
    Query(params): Query<CountryQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let (country, exporter) = params.selection()?;
    let svg = blocking(&state, move |d| {
        let chart = d.country_chart(&country, &exporter)?;
        render_stacked_svg(&chart, &GraphOptions::default())
    })
    .await?;
    Ok(svg_response(svg))
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}
