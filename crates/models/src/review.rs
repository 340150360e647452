use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{property, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Review")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "userId")]
    pub user_id: String,
    #[sea_orm(column_name = "propertyId")]
    pub property_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Property,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Property => Entity::belongs_to(property::Entity).from(Column::PropertyId).to(property::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
