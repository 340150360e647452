use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::host;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Property")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "hostId")]
    pub host_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    #[sea_orm(column_name = "pricePerNight")]
    pub price_per_night: f64,
    #[sea_orm(column_name = "bedroomCount")]
    pub bedroom_count: Option<i32>,
    #[sea_orm(column_name = "bathRoomCount")]
    pub bath_room_count: Option<i32>,
    #[sea_orm(column_name = "maxGuestCount")]
    pub max_guest_count: Option<i32>,
    pub rating: Option<i32>,
    /// Free text, e.g. "Wifi, Pool, Parking".
    pub amenities: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Host,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Host => Entity::belongs_to(host::Entity).from(Column::HostId).to(host::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}
