use crate::status::RequestStatus;
use sea_orm::prelude::{DateTimeWithTimeZone, *};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fund_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub employee_id: Uuid,
    pub fund_type: FundType,
    pub amount: f64,
    pub reason: String,
    pub request_type: String,
    pub status: RequestStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum FundType {
    #[sea_orm(string_value = "TRAVEL")]
    Travel,
    #[sea_orm(string_value = "MEDICAL")]
    Medical,
    #[sea_orm(string_value = "EDUCATION")]
    Education,
    #[sea_orm(string_value = "EQUIPMENT")]
    Equipment,
    #[sea_orm(string_value = "EMERGENCY")]
    Emergency,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl FundType {
    pub fn as_str(self) -> &'static str {
        match self {
            FundType::Travel => "TRAVEL",
            FundType::Medical => "MEDICAL",
            FundType::Education => "EDUCATION",
            FundType::Equipment => "EQUIPMENT",
            FundType::Emergency => "EMERGENCY",
            FundType::Other => "OTHER",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "TRAVEL" => Some(FundType::Travel),
            "MEDICAL" => Some(FundType::Medical),
            "EDUCATION" => Some(FundType::Education),
            "EQUIPMENT" => Some(FundType::Equipment),
            "EMERGENCY" => Some(FundType::Emergency),
            "OTHER" => Some(FundType::Other),
            _ => None,
        }
    }
}
