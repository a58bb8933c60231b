//! Dictionary API handlers.
//!
//! Each handler is a thin mapping from an HTTP request to one word store
//! call, wrapped in the response envelope.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::dictionary::{Language, ParseLanguageError};
use crate::http::response::{
    AlphabetResponse, ApiError, HealthResponse, ItemResponse, ListResponse, SearchResponse,
};
use crate::http::server::AppState;

const MISSING_SEARCH_PARAMS: &str = "Term and language are required";

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    pub language: Option<String>,
}

/// `GET /dictionary/words`
pub async fn list_words(State(state): State<AppState>) -> Result<Response, ApiError> {
    let words = state
        .store
        .list_all()
        .map_err(ApiError::internal("Failed to retrieve words"))?;
    Ok(Json(ListResponse::new(words)).into_response())
}

/// `GET /dictionary/search?term=জাকা&language=bpy`
pub async fn search_words(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|_| ApiError::Validation(MISSING_SEARCH_PARAMS.into()))?;

    let term = params.term.filter(|t| !t.is_empty());
    let language = params.language.filter(|l| !l.is_empty());
    let (Some(term), Some(language)) = (term, language) else {
        return Err(ApiError::Validation(MISSING_SEARCH_PARAMS.into()));
    };

    let language: Language = language
        .parse()
        .map_err(|e: ParseLanguageError| ApiError::Validation(e.to_string()))?;

    let results = state
        .store
        .search(&term, language)
        .map_err(ApiError::internal("Search failed"))?;

    Ok(Json(SearchResponse {
        success: true,
        count: results.len(),
        search_term: term,
        language,
        data: results,
    })
    .into_response())
}

/// `GET /dictionary/word/{id}`
pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let word = state
        .store
        .get_by_id(&id)
        .map_err(ApiError::internal("Failed to retrieve word"))?
        .ok_or_else(|| ApiError::NotFound("Word not found".into()))?;
    Ok(Json(ItemResponse::new(word)).into_response())
}

/// `GET /dictionary/alphabets`
pub async fn list_alphabets(State(state): State<AppState>) -> Json<ListResponse<String>> {
    let alphabets = state
        .store
        .list_alphabets()
        .into_iter()
        .map(str::to_owned)
        .collect();
    Json(ListResponse::new(alphabets))
}

/// `GET /dictionary/alphabet/{letter}`
pub async fn words_by_alphabet(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Response, ApiError> {
    let words = state
        .store
        .get_by_alphabet(&letter)
        .map_err(ApiError::internal("Failed to retrieve words for alphabet"))?;

    if words.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No words found for alphabet: {letter}"
        )));
    }

    Ok(Json(AlphabetResponse {
        success: true,
        count: words.len(),
        data: words.iter().collect(),
        alphabet: letter,
    })
    .into_response())
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Bishnupriya Dictionary API is running",
    })
}

/// JSON 404 for paths that match no route.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}
