// Library for tests to access modules

pub mod analytics;
pub mod config;
pub mod models;
pub mod report_repo;
pub mod routes;
pub mod version;
pub mod worker;
