//! 预导入模块，方便使用

pub use super::activities::{
    ActiveModel as ActivityActiveModel, Entity as Activities, Model as ActivityModel,
};
pub use super::anecdotal_records::{
    ActiveModel as AnecdotalRecordActiveModel, Entity as AnecdotalRecords,
    Model as AnecdotalRecordModel,
};
pub use super::general_evaluations::{
    ActiveModel as GeneralEvaluationActiveModel, Entity as GeneralEvaluations,
    Model as GeneralEvaluationModel,
};
pub use super::group_evaluations::{
    ActiveModel as GroupEvaluationActiveModel, Entity as GroupEvaluations,
    Model as GroupEvaluationModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::learning_targets::{
    ActiveModel as LearningTargetActiveModel, Entity as LearningTargets,
    Model as LearningTargetModel,
};
pub use super::schools::{ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel};
pub use super::student_evaluation_changes::{
    ActiveModel as StudentEvaluationChangeActiveModel, Entity as StudentEvaluationChanges,
    Model as StudentEvaluationChangeModel,
};
pub use super::student_evaluations::{
    ActiveModel as StudentEvaluationActiveModel, Entity as StudentEvaluations,
    Model as StudentEvaluationModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
