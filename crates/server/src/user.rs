//! The authenticated user entity and profile endpoint.

use api_types::user::UserView;
use axum::{Extension, Json};
use sea_orm::entity::prelude::*;

use crate::ServerError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Returns the profile of the authenticated caller.
pub async fn me(Extension(user): Extension<Model>) -> Result<Json<UserView>, ServerError> {
    Ok(Json(UserView {
        username: user.username,
        name: user.name,
        picture: user.picture,
    }))
}
