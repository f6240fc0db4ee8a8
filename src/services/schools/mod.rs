pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::schools::requests::CreateSchoolRequest;

define_service!(SchoolService);

impl SchoolService {
    pub async fn list_schools(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_schools(self, request).await
    }

    pub async fn create_school(
        &self,
        request: &HttpRequest,
        school_data: CreateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_school(self, request, school_data).await
    }
}
