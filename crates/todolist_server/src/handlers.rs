//! Route handlers.
//!
//! Each handler performs one list use-case and either renders a view or
//! redirects (303) to the path that renders the affected collection.

use crate::error::AppError;
use crate::state::AppState;
use crate::views;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use todolist_core::{list_path, ListVisit, TodayView, DEFAULT_LIST_TITLE};

#[derive(Debug, Deserialize)]
pub struct NewItemForm {
    #[serde(rename = "newItem", default)]
    pub new_item: String,
    pub list: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemForm {
    #[serde(default)]
    pub checkbox: String,
    #[serde(rename = "listName")]
    pub list_name: String,
}

pub async fn today(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.with_service(|service| service.today()).await? {
        TodayView::Seeded => Ok(Redirect::to("/").into_response()),
        TodayView::Items(items) => {
            Ok(Html(views::list_page(DEFAULT_LIST_TITLE, &items).into_string()).into_response())
        }
    }
}

pub async fn custom_list(
    State(state): State<AppState>,
    Path(list_name): Path<String>,
) -> Result<Response, AppError> {
    let visit = state
        .with_service(move |service| service.visit_list(&list_name))
        .await?;
    match visit {
        ListVisit::Created(name) => Ok(Redirect::to(&list_path(&name)).into_response()),
        ListVisit::Existing(list) => {
            Ok(Html(views::list_page(&list.name, &list.items).into_string()).into_response())
        }
    }
}

pub async fn add_item(
    State(state): State<AppState>,
    Form(form): Form<NewItemForm>,
) -> Result<Redirect, AppError> {
    let target = state
        .with_service(move |service| service.add_item(&form.list, &form.new_item))
        .await?;
    Ok(Redirect::to(&target.path()))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Form(form): Form<DeleteItemForm>,
) -> Result<Redirect, AppError> {
    let target = state
        .with_service(move |service| service.delete_item(&form.list_name, &form.checkbox))
        .await?;
    Ok(Redirect::to(&target.path()))
}

pub async fn about() -> Html<String> {
    Html(views::about_page().into_string())
}
