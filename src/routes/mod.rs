pub mod auth;

pub mod users;

pub mod persons;

pub mod courses;

pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use persons::configure_person_routes;
pub use users::configure_user_routes;
