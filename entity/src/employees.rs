use sea_orm::prelude::{Date, DateTimeWithTimeZone, *};
use uuid::Uuid;

/// HR profile attached to a user account. One per user, never shared.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    pub hire_date: Date,
    pub salary: f64,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::vacation_requests::Entity")]
    VacationRequest,
    #[sea_orm(has_many = "super::fund_requests::Entity")]
    FundRequest,
    #[sea_orm(has_many = "super::general_requests::Entity")]
    GeneralRequest,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::vacation_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VacationRequest.def()
    }
}

impl Related<super::fund_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundRequest.def()
    }
}

impl Related<super::general_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
