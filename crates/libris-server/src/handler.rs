//! Request handlers.
//!
//! Every handler resolves its [`RequestScope`] exactly once, up front,
//! and threads it through the operations layer. No handler consults
//! ambient state to decide whose catalog it is touching.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use libris_ops::{share_url, NewBook, OpsError, PdfUpload};
use libris_types::{Book, BookId, RequestScope, SearchField, Username};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Query parameters selecting the request's access scope.
///
/// The *presence* of `shared` selects the shared read-only view; the
/// value is not inspected, so `?shared=false` is still shared mode.
/// `user` names the shared target and is trusted verbatim (validated
/// only as a path-safe username); absent, it defaults to `guest`. This
/// is the documented vulnerability surface of the sharing feature.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    shared: Option<String>,
    user: Option<String>,
}

/// Resolve the access scope for a request.
///
/// Shared mode ignores authentication entirely; owner mode requires a
/// bearer token bound to a live session. Returns the session token
/// alongside the scope in owner mode (for session-local reader state).
pub fn resolve_scope(
    state: &AppState,
    headers: &HeaderMap,
    query: &ScopeQuery,
) -> ServerResult<(RequestScope, Option<String>)> {
    if query.shared.is_some() {
        let target = match &query.user {
            Some(name) => Some(Username::new(name.clone())?),
            None => None,
        };
        return Ok((RequestScope::shared(target), None));
    }

    let (token, username) = owner_session(state, headers)?;
    Ok((RequestScope::owner(username), Some(token)))
}

fn owner_session(state: &AppState, headers: &HeaderMap) -> ServerResult<(String, Username)> {
    let token = bearer_token(headers)
        .ok_or_else(|| ServerError::AuthRequired("missing bearer token".into()))?;
    let username = state
        .sessions
        .username_for(token)
        .ok_or_else(|| ServerError::AuthRequired("unknown or expired session".into()))?;
    Ok((token.to_string(), username))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

// ---------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A catalog record as rendered to clients: the persisted fields plus
/// the content-derived id, and (in owner mode only) the session's
/// reader toggle for it. Shared viewers are not offered the reader
/// affordance, so the flag is omitted there.
#[derive(Debug, Serialize)]
pub struct BookView {
    pub id: BookId,
    #[serde(flatten)]
    pub book: Book,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reader_open: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AddBookResponse {
    pub message: String,
    pub book: BookView,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ReaderResponse {
    pub open: bool,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub url: String,
}

fn views(scope: &RequestScope, open: &HashSet<BookId>, books: Vec<Book>) -> Vec<BookView> {
    books
        .into_iter()
        .map(|book| {
            let id = book.id();
            BookView {
                id,
                reader_open: (!scope.is_shared()).then(|| open.contains(&id)),
                book,
            }
        })
        .collect()
}

// ---------------------------------------------------------------
// Service handlers
// ---------------------------------------------------------------

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "libris-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------
// Account handlers
// ---------------------------------------------------------------

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ServerResult<(StatusCode, Json<MessageResponse>)> {
    let username = Username::new(req.username)?;
    state
        .accounts
        .register(&username, &req.password, &req.confirm_password)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful! Please login.".into(),
        }),
    ))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    let username = Username::new(req.username)?;
    state.accounts.login(&username, &req.password)?;
    let token = state.sessions.create(username.clone());
    Ok(Json(LoginResponse {
        token,
        username: username.to_string(),
    }))
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ServerResult<Json<MessageResponse>> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ServerError::AuthRequired("missing bearer token".into()))?;
    state.sessions.remove(token);
    Ok(Json(MessageResponse {
        message: "Logged out.".into(),
    }))
}

// ---------------------------------------------------------------
// Catalog handlers
// ---------------------------------------------------------------

pub async fn list_books(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScopeQuery>,
) -> ServerResult<Json<Vec<BookView>>> {
    let (scope, token) = resolve_scope(&state, &headers, &query)?;
    let books = state.library.load(&scope)?;
    let open = token
        .as_deref()
        .map(|t| state.sessions.open_readers(t))
        .unwrap_or_default();
    Ok(Json(views(&scope, &open, books)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub field: String,
    #[serde(default)]
    pub term: String,
    pub shared: Option<String>,
    pub user: Option<String>,
}

pub async fn search_books(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> ServerResult<Json<Vec<BookView>>> {
    let field: SearchField = query.field.parse()?;
    let scope_query = ScopeQuery {
        shared: query.shared,
        user: query.user,
    };
    let (scope, token) = resolve_scope(&state, &headers, &scope_query)?;
    let catalog = state.library.load(&scope)?;
    let hits = libris_ops::search(&catalog, &query.term, field);
    let open = token
        .as_deref()
        .map(|t| state.sessions.open_readers(t))
        .unwrap_or_default();
    Ok(Json(views(&scope, &open, hits)))
}

pub async fn add_book(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScopeQuery>,
    multipart: Multipart,
) -> ServerResult<(StatusCode, Json<AddBookResponse>)> {
    let (scope, _) = resolve_scope(&state, &headers, &query)?;
    let new = parse_new_book(multipart).await?;
    let book = state.library.add_book(&scope, new)?;
    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            message: format!("Book '{}' added successfully!", book.title),
            book: BookView {
                id: book.id(),
                reader_open: Some(false),
                book,
            },
        }),
    ))
}

async fn parse_new_book(mut multipart: Multipart) -> ServerResult<NewBook> {
    let mut new = NewBook::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => new.title = text(field).await?,
            "author" => new.author = text(field).await?,
            "year" => new.year = text(field).await?,
            "genre" => new.genre = text(field).await?,
            "pdf" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        ServerError::BadRequest("pdf part is missing a file name".into())
                    })?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(e.to_string()))?;
                // An empty file input submitted with the form is "no upload".
                if !bytes.is_empty() {
                    new.pdf = Some(PdfUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }
    Ok(new)
}

async fn text(field: axum::extract::multipart::Field<'_>) -> ServerResult<String> {
    field
        .text()
        .await
        .map_err(|e| ServerError::BadRequest(e.to_string()))
}

pub async fn remove_book(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScopeQuery>,
    Path(title): Path<String>,
) -> ServerResult<Json<RemoveResponse>> {
    let (scope, _) = resolve_scope(&state, &headers, &query)?;
    let removed = state.library.remove_book(&scope, &title)?;
    let message = if removed > 0 {
        format!("Book '{title}' removed successfully!")
    } else {
        format!("Book '{title}' not found in the library.")
    };
    Ok(Json(RemoveResponse { removed, message }))
}

pub async fn download_pdf(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScopeQuery>,
    Path(id): Path<String>,
) -> ServerResult<([(header::HeaderName, &'static str); 1], Vec<u8>)> {
    let id = BookId::from_hex(&id)?;
    let (scope, _) = resolve_scope(&state, &headers, &query)?;
    let bytes = state.library.open_pdf(&scope, id)?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}

pub async fn toggle_reader(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ServerResult<Json<ReaderResponse>> {
    let (token, username) = owner_session(&state, &headers)?;
    let id = BookId::from_hex(&id)?;

    let scope = RequestScope::owner(username);
    let catalog = state.library.load(&scope)?;
    if !catalog.iter().any(|book| book.id() == id) {
        return Err(OpsError::BookNotFound(id).into());
    }

    let open = state
        .sessions
        .toggle_reader(&token, id)
        .ok_or_else(|| ServerError::AuthRequired("unknown or expired session".into()))?;
    Ok(Json(ReaderResponse { open }))
}

// ---------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------

pub async fn share_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ServerResult<Json<ShareResponse>> {
    let (_, username) = owner_session(&state, &headers)?;
    Ok(Json(ShareResponse {
        url: share_url(&state.config.public_base_url, &username),
    }))
}
