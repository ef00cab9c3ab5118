use crate::errors::{AppError, PAGE_500};
use crate::model::listing::{ListingQuery, ListingRequest};
use crate::model::post::{Post, SortOrder};
use crate::model::tag::{Tag, TagFilter};
use crate::service::listing_service::Deadline;
use crate::util::date::format_timestamp;
use crate::util::extractor::{Form, Path, ValidatedQuery};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Extension, Router};
#[cfg(not(debug_assertions))]
use include_dir::{include_dir, Dir};
use minijinja::{context, Environment};
use tracing::error;

type HtmlResult = Result<Html<String>, HtmlError>;

pub fn create_routes() -> Router<AppState> {
    let mut env = Environment::new();
    load_templates(&mut env);
    env.add_filter("date", format_timestamp);

    Router::new()
        .route("/", get(home))
        .route("/posts", get(post_list))
        .route("/posts/", get(post_list))
        .route("/posts/filter-by-tags", post(filter_by_tags))
        .route("/posts/{id}", get(post_item))
        .layer(Extension(env))
}

async fn home(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
) -> HtmlResult {
    let deadline = Deadline::after(state.config.request_timeout());
    let filter = TagFilter::none();

    let (recent_posts, tags) = tokio::try_join!(
        deadline.run(Post::list(
            &state.db,
            0,
            state.config.recent_posts,
            SortOrder::NewestFirst,
            &filter,
        )),
        deadline.run(Tag::list_all(&state.db)),
    )?;

    let template = env.get_template("home.html")?;
    Ok(Html(template.render(context! {
        app_name => state.config.app_name,
        static_url => state.config.static_url,
        recent_posts,
        tags,
    })?))
}

async fn post_list(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
    ValidatedQuery(query): ValidatedQuery<ListingQuery>,
) -> HtmlResult {
    let request = ListingRequest::try_from(query)?;
    let deadline = Deadline::after(state.config.request_timeout());
    let listing = state.planner.list(&state.db, &request, deadline).await?;

    let template = env.get_template("posts.html")?;
    Ok(Html(template.render(context! {
        app_name => state.config.app_name,
        static_url => state.config.static_url,
        limit_options => state.config.page_size_options,
        listing,
    })?))
}

async fn post_item(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
    Path(id): Path<i64>,
) -> HtmlResult {
    let deadline = Deadline::after(state.config.request_timeout());
    let post = deadline.run(Post::get(&state.db, id)).await?;

    let template = env.get_template("post.html")?;
    Ok(Html(template.render(context! {
        app_name => state.config.app_name,
        static_url => state.config.static_url,
        post,
    })?))
}

/// Turns the checkbox form into a `/posts?tags=...` listing link.
async fn filter_by_tags(Form(fields): Form<Vec<(String, String)>>) -> Redirect {
    let filter: TagFilter = fields
        .into_iter()
        .filter(|(key, _)| key == "tags")
        .filter_map(|(_, value)| value.trim().parse::<i64>().ok())
        .collect();

    if filter.is_empty() {
        Redirect::to("/posts")
    } else {
        Redirect::to(&format!("/posts?tags={}", filter.to_query_value()))
    }
}

#[derive(Debug)]
enum HtmlError {
    App(AppError),
    TemplateError(minijinja::Error),
}

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        HtmlError::App(err)
    }
}

impl From<minijinja::Error> for HtmlError {
    fn from(err: minijinja::Error) -> Self {
        HtmlError::TemplateError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        match self {
            HtmlError::App(err) => err.into_response(),
            HtmlError::TemplateError(err) => {
                error!("template error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(PAGE_500)).into_response()
            }
        }
    }
}

#[cfg(not(debug_assertions))]
static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

#[cfg(debug_assertions)]
fn load_templates(env: &mut Environment<'static>) {
    use minijinja::path_loader;
    // In development mode, use the file system to load templates in real-time
    env.set_loader(path_loader("templates"));
}

#[cfg(not(debug_assertions))]
fn load_templates(env: &mut Environment<'static>) {
    // In production mode, load templates from the embedded files
    for file in TEMPLATES_DIR.files() {
        if let (Some(name), Some(content)) = (file.path().to_str(), file.contents_utf8()) {
            if let Err(err) = env.add_template(name, content) {
                error!("cannot load template {}: {}", name, err);
            }
        }
    }
}
