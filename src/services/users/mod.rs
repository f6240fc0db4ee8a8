pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};

define_service!(UserService);

impl UserService {
    // 获取用户列表
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        request: &HttpRequest,
        user_data: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, request, user_data).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        get::get_user(self, request, user_id).await
    }

    // 当前用户
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_me(request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        update_data: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, request, user_id, update_data).await
    }
}
