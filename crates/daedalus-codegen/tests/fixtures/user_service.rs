use daedalus::core::{ApiError, RequestContext};

pub struct UserApi;

pub struct ProfileParams {
    pub login: String,
}

pub struct CreateParams {
    pub login: String,
    pub status: String,
    pub age: i64,
}

pub struct User {
    pub id: i64,
    pub login: String,
}

pub struct NewUser {
    pub id: i64,
}

impl UserApi {
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, ctx: &RequestContext, params: ProfileParams) -> Result<User, ApiError> {
        todo!()
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, ctx: &RequestContext, params: CreateParams) -> Result<NewUser, ApiError> {
        todo!()
    }
}

pub struct StatsApi;

pub struct ReportParams {
    pub period: String,
}

pub struct Report {
    pub total: i64,
}

impl StatsApi {
    /// apigen:api {"url": "/stats/report", "auth": true, "method": "POST"}
    pub fn report(&self, ctx: &RequestContext, params: ReportParams) -> Result<Report, ApiError> {
        todo!()
    }
}
