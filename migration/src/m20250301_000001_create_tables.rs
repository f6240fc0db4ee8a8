use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学校表
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schools::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schools::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Schools::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Schools::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建教职工用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::SchoolId).big_integer().null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(
                        ColumnDef::new(Users::ProfessorExperienceEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班组表
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::Level).string().not_null())
                    .col(
                        ColumnDef::new(Groups::ResponsibleProfessorId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Groups::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Groups::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Groups::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Groups::Table, Groups::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Groups::Table, Groups::ResponsibleProfessorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Rut).string().not_null())
                    .col(ColumnDef::new(Students::ListNumber).integer().not_null())
                    .col(ColumnDef::new(Students::BirthDate).date().null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学习目标表
        manager
            .create_table(
                Table::create()
                    .table(LearningTargets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LearningTargets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LearningTargets::Core).string().not_null())
                    .col(ColumnDef::new(LearningTargets::Level).string().not_null())
                    .col(
                        ColumnDef::new(LearningTargets::Identifier)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LearningTargets::Name).text().not_null())
                    .col(
                        ColumnDef::new(LearningTargets::AbbreviatedName)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建活动表（含教案默认内容）
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Activities::LearningTargetId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Activities::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Activities::Beginning).text().not_null())
                    .col(ColumnDef::new(Activities::Development).text().not_null())
                    .col(ColumnDef::new(Activities::Conclusion).text().not_null())
                    .col(
                        ColumnDef::new(Activities::IdentityAndAutonomyTarget)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Activities::CoexistenceAndCitizenshipTarget)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Activities::CorporalityAndMovementTarget)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activities::Materials).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Activities::Table, Activities::LearningTargetId)
                            .to(LearningTargets::Table, LearningTargets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估任务表
        manager
            .create_table(
                Table::create()
                    .table(GeneralEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneralEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GeneralEvaluations::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralEvaluations::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GeneralEvaluations::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(GeneralEvaluations::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GeneralEvaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralEvaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneralEvaluations::Table, GeneralEvaluations::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneralEvaluations::Table, GeneralEvaluations::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班组评估表
        manager
            .create_table(
                Table::create()
                    .table(GroupEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::GroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(GroupEvaluations::Beginning).text().null())
                    .col(ColumnDef::new(GroupEvaluations::Development).text().null())
                    .col(ColumnDef::new(GroupEvaluations::Conclusion).text().null())
                    .col(
                        ColumnDef::new(GroupEvaluations::IdentityAndAutonomyTarget)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::CoexistenceAndCitizenshipTarget)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::CorporalityAndMovementTarget)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(GroupEvaluations::Materials).text().null())
                    .col(
                        ColumnDef::new(GroupEvaluations::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupEvaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GroupEvaluations::Table, GroupEvaluations::EvaluationId)
                            .to(GeneralEvaluations::Table, GeneralEvaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GroupEvaluations::Table, GroupEvaluations::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生评估表
        manager
            .create_table(
                Table::create()
                    .table(StudentEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::GroupEvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::Classification)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(StudentEvaluations::Annotations).text().null())
                    .col(
                        ColumnDef::new(StudentEvaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                StudentEvaluations::Table,
                                StudentEvaluations::GroupEvaluationId,
                            )
                            .to(GroupEvaluations::Table, GroupEvaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentEvaluations::Table, StudentEvaluations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建分级变更记录表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(StudentEvaluationChanges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentEvaluationChanges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluationChanges::StudentEvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluationChanges::FromClassification)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluationChanges::ToClassification)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluationChanges::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                StudentEvaluationChanges::Table,
                                StudentEvaluationChanges::StudentEvaluationId,
                            )
                            .to(StudentEvaluations::Table, StudentEvaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建轶事记录表
        manager
            .create_table(
                Table::create()
                    .table(AnecdotalRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnecdotalRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::ActivityId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(AnecdotalRecords::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(AnecdotalRecords::ObservationTime)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::ObservationSource)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::ObservedBehaviour)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::Interpretation)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AnecdotalRecords::Comments).text().null())
                    .col(ColumnDef::new(AnecdotalRecords::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(AnecdotalRecords::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnecdotalRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnecdotalRecords::Table, AnecdotalRecords::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnecdotalRecords::Table, AnecdotalRecords::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnecdotalRecords::Table, AnecdotalRecords::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_groups_school_id")
                    .table(Groups::Table)
                    .col(Groups::SchoolId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_group_id")
                    .table(Students::Table)
                    .col(Students::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_group_evaluations_evaluation_group")
                    .table(GroupEvaluations::Table)
                    .col(GroupEvaluations::EvaluationId)
                    .col(GroupEvaluations::GroupId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_evaluations_group_evaluation_id")
                    .table(StudentEvaluations::Table)
                    .col(StudentEvaluations::GroupEvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_evaluations_student_id")
                    .table(StudentEvaluations::Table)
                    .col(StudentEvaluations::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_evaluation_changes_student_evaluation_id")
                    .table(StudentEvaluationChanges::Table)
                    .col(StudentEvaluationChanges::StudentEvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_anecdotal_records_student_id")
                    .table(AnecdotalRecords::Table)
                    .col(AnecdotalRecords::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按依赖关系逆序删除
        manager
            .drop_table(Table::drop().table(AnecdotalRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentEvaluationChanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeneralEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LearningTargets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Schools {
    #[sea_orm(iden = "schools")]
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    Role,
    Status,
    SchoolId,
    DisplayName,
    ProfessorExperienceEnabled,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Groups {
    #[sea_orm(iden = "school_groups")]
    Table,
    Id,
    SchoolId,
    Name,
    Level,
    ResponsibleProfessorId,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    GroupId,
    FirstName,
    LastName,
    Rut,
    ListNumber,
    BirthDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LearningTargets {
    #[sea_orm(iden = "learning_targets")]
    Table,
    Id,
    Core,
    Level,
    Identifier,
    Name,
    AbbreviatedName,
}

#[derive(DeriveIden)]
enum Activities {
    #[sea_orm(iden = "activities")]
    Table,
    Id,
    LearningTargetId,
    Code,
    Beginning,
    Development,
    Conclusion,
    IdentityAndAutonomyTarget,
    CoexistenceAndCitizenshipTarget,
    CorporalityAndMovementTarget,
    Materials,
}

#[derive(DeriveIden)]
enum GeneralEvaluations {
    #[sea_orm(iden = "general_evaluations")]
    Table,
    Id,
    SchoolId,
    ActivityId,
    DueDate,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GroupEvaluations {
    #[sea_orm(iden = "group_evaluations")]
    Table,
    Id,
    EvaluationId,
    GroupId,
    Status,
    Beginning,
    Development,
    Conclusion,
    IdentityAndAutonomyTarget,
    CoexistenceAndCitizenshipTarget,
    CorporalityAndMovementTarget,
    Materials,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentEvaluations {
    #[sea_orm(iden = "student_evaluations")]
    Table,
    Id,
    GroupEvaluationId,
    StudentId,
    Classification,
    Annotations,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentEvaluationChanges {
    #[sea_orm(iden = "student_evaluation_changes")]
    Table,
    Id,
    StudentEvaluationId,
    FromClassification,
    ToClassification,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AnecdotalRecords {
    #[sea_orm(iden = "anecdotal_records")]
    Table,
    Id,
    StudentId,
    ActivityId,
    CreatedBy,
    ObservationTime,
    ObservationSource,
    ObservedBehaviour,
    Interpretation,
    Comments,
    ImageUrl,
    Active,
    CreatedAt,
    UpdatedAt,
}
