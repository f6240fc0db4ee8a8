//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod anecdotal_records;
mod catalog;
mod evaluations;
mod group_evaluations;
mod groups;
mod reports;
mod schools;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{ClassPointError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 使用已建立的连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassPointError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassPointError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassPointError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassPointError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    PaginatedResponse,
    anecdotal_records::{
        entities::AnecdotalRecord,
        requests::{
            CreateAnecdotalRecordRequest, StudentsWithRecordsQuery, UpdateAnecdotalRecordRequest,
        },
        responses::StudentsWithRecordsResponse,
    },
    evaluations::{
        entities::{GeneralEvaluation, GroupEvaluation, StudentEvaluation, StudentEvaluationChange},
        requests::{
            EvaluationListQuery, GradeGroupEvaluationRequest, GroupEvaluationListQuery,
            NewEvaluation, UpdateEvaluationRequest,
        },
        responses::{
            EvaluationListItem, EvaluationListResponse, GradingOutcome,
            GroupEvaluationListResponse, ReconciliationSummary,
        },
    },
    groups::{
        entities::Group,
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
    learning_targets::{
        entities::{Activity, LearningTarget},
        requests::{
            ActivityListQuery, CreateActivityRequest, CreateLearningTargetRequest,
            LearningTargetListParams,
        },
    },
    reports::entities::{EvaluationFact, EvaluationFactFilter},
    schools::entities::School,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, UpdateStudentRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
        scope::AccessScope,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学校模块
    async fn create_school(&self, name: String) -> Result<School> {
        self.create_school_impl(name).await
    }

    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    async fn list_schools(&self) -> Result<Vec<School>> {
        self.list_schools_impl().await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 班组模块
    async fn create_group(&self, school_id: i64, group: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(school_id, group).await
    }

    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(id).await
    }

    async fn list_groups_with_pagination(
        &self,
        scope: &AccessScope,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        self.list_groups_with_pagination_impl(scope, query).await
    }

    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>> {
        self.update_group_impl(id, update).await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    async fn list_group_ids_for_professor(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_group_ids_for_professor_impl(user_id).await
    }

    // 学生模块
    async fn create_student(
        &self,
        group_id: i64,
        student: CreateStudentRequest,
    ) -> Result<Student> {
        self.create_student_impl(group_id, student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_by_group(&self, group_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_group_impl(group_id).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn find_student_by_rut(&self, school_id: i64, rut: &str) -> Result<Option<Student>> {
        self.find_student_by_rut_impl(school_id, rut).await
    }

    // 学习目标与活动模块
    async fn create_learning_target(
        &self,
        target: CreateLearningTargetRequest,
    ) -> Result<LearningTarget> {
        self.create_learning_target_impl(target).await
    }

    async fn get_learning_target_by_id(&self, id: i64) -> Result<Option<LearningTarget>> {
        self.get_learning_target_by_id_impl(id).await
    }

    async fn list_learning_targets(
        &self,
        params: LearningTargetListParams,
    ) -> Result<Vec<LearningTarget>> {
        self.list_learning_targets_impl(params).await
    }

    async fn create_activity(&self, activity: CreateActivityRequest) -> Result<Activity> {
        self.create_activity_impl(activity).await
    }

    async fn get_activity_by_id(&self, id: i64) -> Result<Option<Activity>> {
        self.get_activity_by_id_impl(id).await
    }

    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<PaginatedResponse<Activity>> {
        self.list_activities_with_pagination_impl(query).await
    }

    // 评估任务模块
    async fn create_evaluation(
        &self,
        evaluation: NewEvaluation,
    ) -> Result<(GeneralEvaluation, ReconciliationSummary)> {
        self.create_evaluation_impl(evaluation).await
    }

    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<GeneralEvaluation>> {
        self.get_evaluation_by_id_impl(id).await
    }

    async fn get_evaluation_item(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Option<EvaluationListItem>> {
        self.get_evaluation_item_impl(id, today).await
    }

    async fn list_evaluations_with_pagination(
        &self,
        scope: &AccessScope,
        query: EvaluationListQuery,
        today: NaiveDate,
    ) -> Result<EvaluationListResponse> {
        self.list_evaluations_with_pagination_impl(scope, query, today)
            .await
    }

    async fn update_evaluation(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<(GeneralEvaluation, ReconciliationSummary)>> {
        self.update_evaluation_impl(id, update).await
    }

    async fn delete_evaluation(&self, id: i64) -> Result<bool> {
        self.delete_evaluation_impl(id).await
    }

    // 班组评估模块
    async fn list_group_evaluations_by_evaluation(
        &self,
        evaluation_id: i64,
    ) -> Result<Vec<GroupEvaluation>> {
        self.list_group_evaluations_by_evaluation_impl(evaluation_id)
            .await
    }

    async fn get_group_evaluation_by_id(&self, id: i64) -> Result<Option<GroupEvaluation>> {
        self.get_group_evaluation_by_id_impl(id).await
    }

    async fn list_group_evaluations_with_pagination(
        &self,
        scope: &AccessScope,
        query: GroupEvaluationListQuery,
    ) -> Result<GroupEvaluationListResponse> {
        self.list_group_evaluations_with_pagination_impl(scope, query)
            .await
    }

    async fn list_student_evaluations(
        &self,
        group_evaluation_id: i64,
    ) -> Result<Vec<StudentEvaluation>> {
        self.list_student_evaluations_impl(group_evaluation_id).await
    }

    async fn grade_group_evaluation(
        &self,
        id: i64,
        grading: GradeGroupEvaluationRequest,
    ) -> Result<GradingOutcome> {
        self.grade_group_evaluation_impl(id, grading).await
    }

    async fn finalize_group_evaluation(&self, id: i64) -> Result<GroupEvaluation> {
        self.finalize_group_evaluation_impl(id).await
    }

    async fn delete_group_evaluation(&self, id: i64) -> Result<bool> {
        self.delete_group_evaluation_impl(id).await
    }

    async fn get_student_evaluation(
        &self,
        group_evaluation_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentEvaluation>> {
        self.get_student_evaluation_impl(group_evaluation_id, student_id)
            .await
    }

    async fn list_student_evaluation_changes(
        &self,
        student_evaluation_id: i64,
    ) -> Result<Vec<StudentEvaluationChange>> {
        self.list_student_evaluation_changes_impl(student_evaluation_id)
            .await
    }

    // 报表模块
    async fn list_evaluation_facts(
        &self,
        filter: EvaluationFactFilter,
    ) -> Result<Vec<EvaluationFact>> {
        self.list_evaluation_facts_impl(filter).await
    }

    // 轶事记录模块
    async fn create_anecdotal_record(
        &self,
        created_by: i64,
        record: CreateAnecdotalRecordRequest,
    ) -> Result<AnecdotalRecord> {
        self.create_anecdotal_record_impl(created_by, record).await
    }

    async fn get_anecdotal_record_by_id(&self, id: i64) -> Result<Option<AnecdotalRecord>> {
        self.get_anecdotal_record_by_id_impl(id).await
    }

    async fn update_anecdotal_record(
        &self,
        id: i64,
        update: UpdateAnecdotalRecordRequest,
    ) -> Result<Option<AnecdotalRecord>> {
        self.update_anecdotal_record_impl(id, update).await
    }

    async fn deactivate_anecdotal_record(&self, id: i64) -> Result<bool> {
        self.deactivate_anecdotal_record_impl(id).await
    }

    async fn list_anecdotal_records_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<AnecdotalRecord>> {
        self.list_anecdotal_records_for_student_impl(student_id)
            .await
    }

    async fn list_students_with_records(
        &self,
        scope: &AccessScope,
        query: StudentsWithRecordsQuery,
    ) -> Result<StudentsWithRecordsResponse> {
        self.list_students_with_records_impl(scope, query).await
    }
}
