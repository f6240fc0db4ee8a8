//! 评估流程集成测试
//!
//! 使用内存 SQLite 运行完整迁移，直接调用服务层并检查响应。

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::StatusCode, test};
use sea_orm::Database;
use serde_json::Value;

use rust_classpoint_next::models::evaluations::entities::Classification;
use rust_classpoint_next::models::evaluations::requests::{
    CreateEvaluationRequest, GradeGroupEvaluationRequest, StudentGradeInput,
    UpdateEvaluationRequest,
};
use rust_classpoint_next::models::groups::entities::{Group, GroupLevel};
use rust_classpoint_next::models::evaluations::timeline::NOT_EVALUATED_LABEL;
use rust_classpoint_next::models::groups::requests::{CreateGroupRequest, UpdateGroupRequest};
use rust_classpoint_next::models::learning_targets::entities::{Activity, Core, LessonPlan};
use rust_classpoint_next::models::learning_targets::requests::{
    CreateActivityRequest, CreateLearningTargetRequest,
};
use rust_classpoint_next::models::students::entities::Student;
use rust_classpoint_next::models::students::requests::CreateStudentRequest;
use rust_classpoint_next::models::users::entities::{User, UserRole};
use rust_classpoint_next::models::users::requests::CreateUserRequest;
use rust_classpoint_next::services::{
    EvaluationService, GroupEvaluationService, GroupService,
};
use rust_classpoint_next::storage::Storage;
use rust_classpoint_next::storage::sea_orm_storage::SeaOrmStorage;

struct Fixture {
    storage: Arc<dyn Storage>,
    coordinator: User,
    professor: User,
    group: Group,
    other_group: Group,
    students: Vec<Student>,
    activity: Activity,
}

async fn user(storage: &Arc<dyn Storage>, name: &str, role: UserRole, school_id: i64) -> User {
    storage
        .create_user(CreateUserRequest {
            username: name.to_string(),
            email: format!("{name}@school.test"),
            role,
            school_id: Some(school_id),
            display_name: None,
            professor_experience_enabled: false,
        })
        .await
        .unwrap()
}

async fn group(
    storage: &Arc<dyn Storage>,
    school_id: i64,
    name: &str,
    professor_id: Option<i64>,
) -> Group {
    storage
        .create_group(
            school_id,
            CreateGroupRequest {
                name: name.to_string(),
                level: GroupLevel::Kinder,
                responsible_professor_id: professor_id,
            },
        )
        .await
        .unwrap()
}

async fn student(
    storage: &Arc<dyn Storage>,
    group_id: i64,
    first_name: &str,
    rut: &str,
    list_number: i32,
) -> Student {
    storage
        .create_student(
            group_id,
            CreateStudentRequest {
                first_name: first_name.to_string(),
                last_name: "Soto".to_string(),
                rut: rut.to_string(),
                list_number,
                birth_date: None,
            },
        )
        .await
        .unwrap()
}

async fn setup() -> Fixture {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::from_connection(db).await.unwrap());

    let school = storage.create_school("Escuela Los Aromos".to_string()).await.unwrap();
    let coordinator = user(&storage, "coordinadora", UserRole::Coordinator, school.id).await;
    let professor = user(&storage, "profesora", UserRole::Professor, school.id).await;

    let group_a = group(&storage, school.id, "Kinder A", Some(professor.id)).await;
    let group_b = group(&storage, school.id, "Kinder B", None).await;

    let mut students = Vec::new();
    for (index, (first, rut)) in [("Ana", "11111111-1"), ("Benito", "22222222-2"), ("Carla", "33333333-3")]
        .into_iter()
        .enumerate()
    {
        students.push(student(&storage, group_a.id, first, rut, index as i32 + 1).await);
    }

    let target = storage
        .create_learning_target(CreateLearningTargetRequest {
            core: Core::VerbalLanguage,
            level: GroupLevel::Kinder,
            identifier: 1,
            name: "Expresarse oralmente".to_string(),
            abbreviated_name: "LV1".to_string(),
        })
        .await
        .unwrap();
    let activity = storage
        .create_activity(CreateActivityRequest {
            learning_target_id: target.id,
            code: "LV-01".to_string(),
            lesson_plan: LessonPlan::default(),
        })
        .await
        .unwrap();

    Fixture {
        storage,
        coordinator,
        professor,
        group: group_a,
        other_group: group_b,
        students,
        activity,
    }
}

fn request_as(user: &User) -> HttpRequest {
    let request = test::TestRequest::default().to_http_request();
    request.extensions_mut().insert(user.clone());
    request
}

async fn json_body(response: HttpResponse) -> Value {
    let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// 协调员为指定班组创建评估任务，返回任务 ID
async fn create_evaluation(fixture: &Fixture, group_ids: Vec<i64>) -> i64 {
    let service = EvaluationService::with_storage(fixture.storage.clone());
    let response = service
        .create_evaluation(
            &request_as(&fixture.coordinator),
            CreateEvaluationRequest {
                activity_id: fixture.activity.id,
                due_date: None,
                group_ids,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    body["data"]["evaluation"]["id"].as_i64().unwrap()
}

async fn update_groups(fixture: &Fixture, evaluation_id: i64, group_ids: Vec<i64>) -> HttpResponse {
    EvaluationService::with_storage(fixture.storage.clone())
        .update_evaluation(
            &request_as(&fixture.coordinator),
            evaluation_id,
            UpdateEvaluationRequest {
                activity_id: None,
                due_date: None,
                group_ids: Some(group_ids),
            },
        )
        .await
        .unwrap()
}

/// 为单个学生评估打分，返回 (updated, changes_recorded)
async fn grade_one(
    fixture: &Fixture,
    group_evaluation_id: i64,
    student_evaluation_id: i64,
    classification: Classification,
) -> (i64, i64) {
    let response = GroupEvaluationService::with_storage(fixture.storage.clone())
        .grade_group_evaluation(
            &request_as(&fixture.coordinator),
            group_evaluation_id,
            GradeGroupEvaluationRequest {
                student_evaluations: vec![StudentGradeInput {
                    id: student_evaluation_id,
                    classification,
                    annotations: None,
                }],
                overrides: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    (
        body["data"]["updated"].as_i64().unwrap(),
        body["data"]["changes_recorded"].as_i64().unwrap(),
    )
}

async fn only_group_evaluation(fixture: &Fixture, evaluation_id: i64) -> i64 {
    let group_evaluations = fixture
        .storage
        .list_group_evaluations_by_evaluation(evaluation_id)
        .await
        .unwrap();
    assert_eq!(group_evaluations.len(), 1);
    group_evaluations[0].id
}

#[actix_web::test]
async fn test_create_evaluation_seeds_not_evaluated_rows() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;

    let rows = fixture
        .storage
        .list_student_evaluations(group_evaluation_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), fixture.students.len());
    assert!(
        rows.iter()
            .all(|row| row.classification == Classification::NotEvaluated)
    );
}

#[actix_web::test]
async fn test_grade_then_finalize_once() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;
    let rows = fixture
        .storage
        .list_student_evaluations(group_evaluation_id)
        .await
        .unwrap();

    let service = GroupEvaluationService::with_storage(fixture.storage.clone());
    let professor = request_as(&fixture.professor);

    let response = service
        .grade_group_evaluation(
            &professor,
            group_evaluation_id,
            GradeGroupEvaluationRequest {
                student_evaluations: vec![
                    StudentGradeInput {
                        id: rows[0].id,
                        classification: Classification::Achieved,
                        annotations: Some("  participa  ".to_string()),
                    },
                    StudentGradeInput {
                        id: rows[1].id,
                        classification: Classification::NotAchieved,
                        annotations: None,
                    },
                ],
                overrides: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["updated"], 2);
    assert_eq!(body["data"]["changes_recorded"], 2);

    let response = service
        .finalize_group_evaluation(&professor, group_evaluation_id)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = service
        .finalize_group_evaluation(&professor, group_evaluation_id)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 1 人未达成 + 1 人缺席，占 3 人中的 66%
    let response = service
        .get_group_evaluation_stats(&professor, group_evaluation_id)
        .await
        .unwrap();
    let stats = json_body(response).await;
    assert_eq!(stats["data"]["total_students"], 3);
    assert_eq!(stats["data"]["counts"]["achieved"], 1);
    assert_eq!(stats["data"]["needs_remedial"], true);
}

#[actix_web::test]
async fn test_completion_follows_finalized_groups() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;

    let evaluations = EvaluationService::with_storage(fixture.storage.clone());
    let coordinator = request_as(&fixture.coordinator);

    let body = json_body(
        evaluations
            .get_evaluation(&coordinator, evaluation_id)
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["evaluation"]["completion_percent"], 0.0);
    assert_eq!(body["data"]["evaluation"]["status"], "current");

    GroupEvaluationService::with_storage(fixture.storage.clone())
        .finalize_group_evaluation(&coordinator, group_evaluation_id)
        .await
        .unwrap();

    let body = json_body(
        evaluations
            .get_evaluation(&coordinator, evaluation_id)
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["evaluation"]["completion_percent"], 100.0);
    assert_eq!(body["data"]["evaluation"]["status"], "completed");
}

#[actix_web::test]
async fn test_professor_is_limited_to_assigned_groups() {
    let fixture = setup().await;

    let service = EvaluationService::with_storage(fixture.storage.clone());
    let response = service
        .create_evaluation(
            &request_as(&fixture.professor),
            CreateEvaluationRequest {
                activity_id: fixture.activity.id,
                due_date: None,
                group_ids: vec![fixture.group.id, fixture.other_group.id],
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let evaluation_id = create_evaluation(&fixture, vec![fixture.other_group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;
    let response = GroupEvaluationService::with_storage(fixture.storage.clone())
        .get_group_evaluation(&request_as(&fixture.professor), group_evaluation_id)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_evaluation_removes_group_evaluations() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;

    let response = EvaluationService::with_storage(fixture.storage.clone())
        .delete_evaluation(&request_as(&fixture.coordinator), evaluation_id)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(
        fixture
            .storage
            .get_group_evaluation_by_id(group_evaluation_id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        fixture
            .storage
            .list_student_evaluations(group_evaluation_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[actix_web::test]
async fn test_student_rut_is_unique_per_school() {
    let fixture = setup().await;
    let service = GroupService::with_storage(fixture.storage.clone());
    let coordinator = request_as(&fixture.coordinator);

    let response = service
        .add_group_student(
            &coordinator,
            fixture.other_group.id,
            CreateStudentRequest {
                first_name: "Diego".to_string(),
                last_name: "Rojas".to_string(),
                rut: "11.111.111-1".to_string(),
                list_number: 1,
                birth_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = service
        .add_group_student(
            &coordinator,
            fixture.other_group.id,
            CreateStudentRequest {
                first_name: "Diego".to_string(),
                last_name: "Rojas".to_string(),
                rut: "12.345.678-9".to_string(),
                list_number: 1,
                birth_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = service
        .add_group_student(
            &coordinator,
            fixture.other_group.id,
            CreateStudentRequest {
                first_name: "Diego".to_string(),
                last_name: "Rojas".to_string(),
                rut: "12.345.678-5".to_string(),
                list_number: 1,
                birth_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["rut"], "12345678-5");
}

#[actix_web::test]
async fn test_group_edit_keeps_grading_and_backfills_new_members() {
    let fixture = setup().await;
    // 原选择 {B, A}，改为 {A, C}：B 被移除，A 保留，C 新增
    let evaluation_id =
        create_evaluation(&fixture, vec![fixture.other_group.id, fixture.group.id]).await;
    let kept = fixture
        .storage
        .list_group_evaluations_by_evaluation(evaluation_id)
        .await
        .unwrap()
        .into_iter()
        .find(|ge| ge.group_id == fixture.group.id)
        .unwrap();
    let rows = fixture.storage.list_student_evaluations(kept.id).await.unwrap();
    grade_one(&fixture, kept.id, rows[0].id, Classification::Achieved).await;

    let late_joiner = student(&fixture.storage, fixture.group.id, "Dante", "44444444-4", 4).await;
    let group_c = group(&fixture.storage, fixture.group.school_id, "Kinder C", None).await;
    student(&fixture.storage, group_c.id, "Elena", "55555555-5", 1).await;

    let response = update_groups(&fixture, evaluation_id, vec![fixture.group.id, group_c.id]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["summary"]["groups_added"], 1);
    assert_eq!(body["data"]["summary"]["groups_removed"], 1);
    assert_eq!(body["data"]["summary"]["student_evaluations_created"], 2);

    let group_evaluations = fixture
        .storage
        .list_group_evaluations_by_evaluation(evaluation_id)
        .await
        .unwrap();
    let mut selected: Vec<i64> = group_evaluations.iter().map(|ge| ge.group_id).collect();
    selected.sort();
    let mut expected = vec![fixture.group.id, group_c.id];
    expected.sort();
    assert_eq!(selected, expected);

    // 保留班组的评分与变更记录不受影响，新成员为未评估
    let kept_rows = fixture.storage.list_student_evaluations(kept.id).await.unwrap();
    assert_eq!(kept_rows.len(), 4);
    let graded = kept_rows.iter().find(|row| row.id == rows[0].id).unwrap();
    assert_eq!(graded.classification, Classification::Achieved);
    let joined = kept_rows
        .iter()
        .find(|row| row.student_id == late_joiner.id)
        .unwrap();
    assert_eq!(joined.classification, Classification::NotEvaluated);
    assert_eq!(
        fixture
            .storage
            .list_student_evaluation_changes(rows[0].id)
            .await
            .unwrap()
            .len(),
        1
    );

    let added = group_evaluations
        .iter()
        .find(|ge| ge.group_id == group_c.id)
        .unwrap();
    let added_rows = fixture.storage.list_student_evaluations(added.id).await.unwrap();
    assert_eq!(added_rows.len(), 1);
    assert_eq!(added_rows[0].classification, Classification::NotEvaluated);

    // 选择不变时再次提交不产生任何增删
    let response = update_groups(&fixture, evaluation_id, vec![group_c.id, fixture.group.id]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["summary"]["groups_added"], 0);
    assert_eq!(body["data"]["summary"]["groups_removed"], 0);
    assert_eq!(body["data"]["summary"]["student_evaluations_created"], 0);
}

#[actix_web::test]
async fn test_group_edit_keeps_deactivated_group() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;
    let rows = fixture
        .storage
        .list_student_evaluations(group_evaluation_id)
        .await
        .unwrap();
    grade_one(&fixture, group_evaluation_id, rows[0].id, Classification::NotAchieved).await;

    for group_id in [fixture.group.id, fixture.other_group.id] {
        fixture
            .storage
            .update_group(
                group_id,
                UpdateGroupRequest {
                    name: None,
                    level: None,
                    responsible_professor_id: None,
                    active: Some(false),
                },
            )
            .await
            .unwrap();
    }
    let group_c = group(&fixture.storage, fixture.group.school_id, "Kinder C", None).await;

    // 停用的班组不能新加入
    let response = update_groups(
        &fixture,
        evaluation_id,
        vec![fixture.group.id, fixture.other_group.id],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // 已关联的停用班组可以保留
    let response = update_groups(&fixture, evaluation_id, vec![fixture.group.id, group_c.id]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["summary"]["groups_added"], 1);
    assert_eq!(body["data"]["summary"]["groups_removed"], 0);

    let kept = fixture
        .storage
        .list_student_evaluations(group_evaluation_id)
        .await
        .unwrap();
    let graded = kept.iter().find(|row| row.id == rows[0].id).unwrap();
    assert_eq!(graded.classification, Classification::NotAchieved);
}

#[actix_web::test]
async fn test_regrading_records_only_real_changes() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;
    let rows = fixture
        .storage
        .list_student_evaluations(group_evaluation_id)
        .await
        .unwrap();
    let target = rows[1].id;

    assert_eq!(
        grade_one(&fixture, group_evaluation_id, target, Classification::NotAchieved).await,
        (1, 1)
    );
    assert_eq!(
        grade_one(&fixture, group_evaluation_id, target, Classification::NotAchieved).await,
        (1, 0)
    );
    assert_eq!(
        grade_one(&fixture, group_evaluation_id, target, Classification::Achieved).await,
        (1, 1)
    );

    let changes = fixture
        .storage
        .list_student_evaluation_changes(target)
        .await
        .unwrap();
    let steps: Vec<(Classification, Classification)> = changes
        .iter()
        .map(|change| (change.from_classification, change.to_classification))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Classification::NotEvaluated, Classification::NotAchieved),
            (Classification::NotAchieved, Classification::Achieved),
        ]
    );
}

#[actix_web::test]
async fn test_student_evolution_timeline() {
    let fixture = setup().await;
    let evaluation_id = create_evaluation(&fixture, vec![fixture.group.id]).await;
    let group_evaluation_id = only_group_evaluation(&fixture, evaluation_id).await;
    let rows = fixture
        .storage
        .list_student_evaluations(group_evaluation_id)
        .await
        .unwrap();
    let row = rows
        .iter()
        .find(|row| row.student_id == fixture.students[0].id)
        .unwrap();
    grade_one(&fixture, group_evaluation_id, row.id, Classification::ModeratelyAccomplished).await;
    grade_one(&fixture, group_evaluation_id, row.id, Classification::Achieved).await;

    let service = GroupEvaluationService::with_storage(fixture.storage.clone());
    let response = service
        .get_student_evolution(
            &request_as(&fixture.professor),
            group_evaluation_id,
            fixture.students[0].id,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["classification"], "achieved");
    assert_eq!(body["data"]["changes"].as_array().unwrap().len(), 2);

    let labels: Vec<&str> = body["data"]["intervals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|interval| interval["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            NOT_EVALUATED_LABEL,
            Classification::ModeratelyAccomplished.display_name(),
            Classification::Achieved.display_name(),
        ]
    );

    // 班组评估中没有的学生
    let response = service
        .get_student_evolution(
            &request_as(&fixture.professor),
            group_evaluation_id,
            fixture.students[0].id + 1000,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
