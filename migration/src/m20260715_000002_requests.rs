use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum VacationRequests {
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
    DaysRequested,
    Reason,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FundRequests {
    Table,
    Id,
    EmployeeId,
    FundType,
    Amount,
    Reason,
    RequestType,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GeneralRequests {
    Table,
    Id,
    EmployeeId,
    RequestType,
    Subject,
    Description,
    Priority,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VacationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VacationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VacationRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(VacationRequests::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(VacationRequests::DaysRequested)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VacationRequests::Reason).string_len(1024))
                    .col(
                        ColumnDef::new(VacationRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vacation_requests_employee")
                            .from(VacationRequests::Table, VacationRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vacation_requests_employee")
                    .table(VacationRequests::Table)
                    .col(VacationRequests::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FundRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FundRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FundRequests::EmployeeId).uuid().not_null())
                    .col(
                        ColumnDef::new(FundRequests::FundType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FundRequests::Amount).double().not_null())
                    .col(
                        ColumnDef::new(FundRequests::Reason)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FundRequests::RequestType)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FundRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FundRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FundRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fund_requests_employee")
                            .from(FundRequests::Table, FundRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fund_requests_employee")
                    .table(FundRequests::Table)
                    .col(FundRequests::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GeneralRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneralRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeneralRequests::EmployeeId).uuid().not_null())
                    .col(
                        ColumnDef::new(GeneralRequests::RequestType)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralRequests::Subject)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralRequests::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralRequests::Priority)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_general_requests_employee")
                            .from(GeneralRequests::Table, GeneralRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_general_requests_employee")
                    .table(GeneralRequests::Table)
                    .col(GeneralRequests::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(GeneralRequests::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(FundRequests::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(VacationRequests::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
