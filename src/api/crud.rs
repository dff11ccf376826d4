//! REST surface shared by every entity module.
//!
//! `GET /search?q=` and `GET /stats` are public; everything else sits behind the
//! [`AuthGate`]. Each handler is generic over the entity, so a module only has to
//! provide the record type and call [`resource_router`].

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;

use crate::{
    api::{
        auth::{require_auth, AuthGate},
        errors::ApiResult,
        extract::{CreateRequest, UpdateRequest, ValidatedJson, ValidatedPatch},
    },
    domain::{
        models::{Document, Stats},
        traits::Entity,
        value_objects::parse_record_id,
    },
    dto::{envelope::ApiResponse, query::ListQuery},
    error::AppError,
    services::CrudService,
};

type Service<T> = State<Arc<CrudService<T>>>;
type ListResponse<T> = Json<ApiResponse<Vec<Document<T>>>>;
type ItemResponse<T> = Json<ApiResponse<Document<T>>>;

pub fn resource_router<T: Entity>(service: Arc<CrudService<T>>, auth: AuthGate) -> Router {
    let public = Router::new()
        .route("/search", get(search::<T>))
        .route("/stats", get(get_stats::<T>));

    let protected = Router::new()
        .route("/", get(get_all::<T>).post(create::<T>))
        .route(
            "/:id",
            get(get_by_id::<T>).put(update::<T>).delete(delete::<T>),
        )
        .route("/:id/deactivate", patch(deactivate::<T>))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    public.merge(protected).with_state(service)
}

fn list_query(query: Result<Query<ListQuery>, QueryRejection>) -> Result<ListQuery, AppError> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn get_all<T: Entity>(
    State(service): Service<T>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<ListResponse<T>> {
    let options = list_query(query)?.to_options()?;
    let page = service.get_all(options).await?;
    Ok(Json(ApiResponse::paginated(
        format!("{} retrieved successfully", T::LABEL_PLURAL),
        page,
    )))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn get_by_id<T: Entity>(
    State(service): Service<T>,
    Path(id): Path<String>,
) -> ApiResult<ItemResponse<T>> {
    let document = service.get_by_id(parse_record_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        format!("{} retrieved successfully", T::LABEL),
        document,
    )))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn create<T: Entity>(
    State(service): Service<T>,
    ValidatedJson(payload): ValidatedJson<CreateRequest<T::Create>>,
) -> ApiResult<(StatusCode, ItemResponse<T>)> {
    let document = service.create(payload.fields, payload.is_active).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            format!("{} created successfully", T::LABEL),
            document,
        )),
    ))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn update<T: Entity>(
    State(service): Service<T>,
    Path(id): Path<String>,
    ValidatedPatch(payload): ValidatedPatch<UpdateRequest<T::Update>>,
) -> ApiResult<ItemResponse<T>> {
    let id = parse_record_id(&id)?;
    let document = service.update(id, payload.fields, payload.is_active).await?;
    Ok(Json(ApiResponse::ok(
        format!("{} updated successfully", T::LABEL),
        document,
    )))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn delete<T: Entity>(
    State(service): Service<T>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    service.delete(parse_record_id(&id)?).await?;
    Ok(Json(ApiResponse::message(format!(
        "{} deleted successfully",
        T::LABEL
    ))))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn deactivate<T: Entity>(
    State(service): Service<T>,
    Path(id): Path<String>,
) -> ApiResult<ItemResponse<T>> {
    let document = service.deactivate(parse_record_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        format!("{} deactivated successfully", T::LABEL),
        document,
    )))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn search<T: Entity>(
    State(service): Service<T>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<ListResponse<T>> {
    let query = list_query(query)?;
    let term = query
        .search_term()
        .ok_or_else(|| AppError::Validation("Search term is required".into()))?
        .to_string();
    let page = service.search(&term, query.to_options()?).await?;
    Ok(Json(ApiResponse::paginated(
        format!("{} search results", T::LABEL_PLURAL),
        page,
    )))
}

#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn get_stats<T: Entity>(State(service): Service<T>) -> ApiResult<Json<ApiResponse<Stats>>> {
    let stats = service.get_stats().await?;
    Ok(Json(ApiResponse::ok(
        format!("{} statistics retrieved successfully", T::LABEL),
        stats,
    )))
}

/// Active records only; modules opt in by routing it themselves.
#[instrument(skip_all, fields(entity = T::COLLECTION))]
pub async fn get_active<T: Entity>(
    State(service): Service<T>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<ListResponse<T>> {
    let options = list_query(query)?.to_options()?;
    let page = service.get_active(options).await?;
    Ok(Json(ApiResponse::paginated(
        format!("Active {} retrieved successfully", T::LABEL_PLURAL.to_lowercase()),
        page,
    )))
}
