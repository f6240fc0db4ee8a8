use std::sync::Arc;

use chrono::NaiveDate;

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
            EvaluationListItem, EvaluationListResponse, GradingOutcome, GroupEvaluationListResponse,
            ReconciliationSummary,
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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学校管理方法
    async fn create_school(&self, name: String) -> Result<School>;
    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>>;
    async fn list_schools(&self) -> Result<Vec<School>>;

    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 班组管理方法
    async fn create_group(&self, school_id: i64, group: CreateGroupRequest) -> Result<Group>;
    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>>;
    async fn list_groups_with_pagination(
        &self,
        scope: &AccessScope,
        query: GroupListQuery,
    ) -> Result<GroupListResponse>;
    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>>;
    async fn delete_group(&self, id: i64) -> Result<bool>;
    // 教师负责的有效班组
    async fn list_group_ids_for_professor(&self, user_id: i64) -> Result<Vec<i64>>;

    /// 学生管理方法
    async fn create_student(&self, group_id: i64, student: CreateStudentRequest)
    -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_by_group(&self, group_id: i64) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 在学校范围内按 RUT 查找学生
    async fn find_student_by_rut(&self, school_id: i64, rut: &str) -> Result<Option<Student>>;

    /// 学习目标与活动
    async fn create_learning_target(
        &self,
        target: CreateLearningTargetRequest,
    ) -> Result<LearningTarget>;
    async fn get_learning_target_by_id(&self, id: i64) -> Result<Option<LearningTarget>>;
    async fn list_learning_targets(
        &self,
        params: LearningTargetListParams,
    ) -> Result<Vec<LearningTarget>>;
    async fn create_activity(&self, activity: CreateActivityRequest) -> Result<Activity>;
    async fn get_activity_by_id(&self, id: i64) -> Result<Option<Activity>>;
    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<PaginatedResponse<Activity>>;

    /// 评估任务方法
    // 创建评估任务及其班组评估、学生评估（单一事务）
    async fn create_evaluation(
        &self,
        evaluation: NewEvaluation,
    ) -> Result<(GeneralEvaluation, ReconciliationSummary)>;
    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<GeneralEvaluation>>;
    async fn get_evaluation_item(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Option<EvaluationListItem>>;
    // `today` 用于计算派生状态
    async fn list_evaluations_with_pagination(
        &self,
        scope: &AccessScope,
        query: EvaluationListQuery,
        today: NaiveDate,
    ) -> Result<EvaluationListResponse>;
    // 更新评估任务；提供班组集合时在同一事务内对账
    async fn update_evaluation(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<(GeneralEvaluation, ReconciliationSummary)>>;
    // 级联删除评估任务
    async fn delete_evaluation(&self, id: i64) -> Result<bool>;

    /// 班组评估方法
    async fn list_group_evaluations_by_evaluation(
        &self,
        evaluation_id: i64,
    ) -> Result<Vec<GroupEvaluation>>;
    async fn get_group_evaluation_by_id(&self, id: i64) -> Result<Option<GroupEvaluation>>;
    async fn list_group_evaluations_with_pagination(
        &self,
        scope: &AccessScope,
        query: GroupEvaluationListQuery,
    ) -> Result<GroupEvaluationListResponse>;
    async fn list_student_evaluations(
        &self,
        group_evaluation_id: i64,
    ) -> Result<Vec<StudentEvaluation>>;
    // 批量评分并记录等级变更（单一事务）
    async fn grade_group_evaluation(
        &self,
        id: i64,
        grading: GradeGroupEvaluationRequest,
    ) -> Result<GradingOutcome>;
    // 草稿 → 已提交
    async fn finalize_group_evaluation(&self, id: i64) -> Result<GroupEvaluation>;
    async fn delete_group_evaluation(&self, id: i64) -> Result<bool>;
    async fn get_student_evaluation(
        &self,
        group_evaluation_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentEvaluation>>;
    // 按创建时间升序
    async fn list_student_evaluation_changes(
        &self,
        student_evaluation_id: i64,
    ) -> Result<Vec<StudentEvaluationChange>>;

    /// 报表查询
    async fn list_evaluation_facts(&self, filter: EvaluationFactFilter)
    -> Result<Vec<EvaluationFact>>;

    /// 轶事记录方法
    async fn create_anecdotal_record(
        &self,
        created_by: i64,
        record: CreateAnecdotalRecordRequest,
    ) -> Result<AnecdotalRecord>;
    async fn get_anecdotal_record_by_id(&self, id: i64) -> Result<Option<AnecdotalRecord>>;
    async fn update_anecdotal_record(
        &self,
        id: i64,
        update: UpdateAnecdotalRecordRequest,
    ) -> Result<Option<AnecdotalRecord>>;
    // 软删除
    async fn deactivate_anecdotal_record(&self, id: i64) -> Result<bool>;
    async fn list_anecdotal_records_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<AnecdotalRecord>>;
    async fn list_students_with_records(
        &self,
        scope: &AccessScope,
        query: StudentsWithRecordsQuery,
    ) -> Result<StudentsWithRecordsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
