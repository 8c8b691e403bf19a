// 业务错误码
//
// ApiResponse.code 使用的数字错误码，按模块分段：
// 0 成功，40xx 通用请求错误，1xxxx 用户/人员模块，2xxxx 课程/选课模块。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 4000,
    Unauthorized = 4010,
    AuthFailed = 4011,
    PermissionDenied = 4030,
    NotFound = 4040,
    InternalServerError = 5000,

    // 用户与人员
    UserNotFound = 10001,
    UserNameAlreadyExists = 10002,
    UserNameInvalid = 10003,
    PasswordTooWeak = 10004,
    UserCreationFailed = 10005,
    PersonNotFound = 10006,
    PersonEmailAlreadyExists = 10007,
    PersonEmailInvalid = 10008,
    PersonPayloadInvalid = 10009,
    StudentNotFound = 10010,
    ProfessorNotFound = 10011,

    // 课程与选课
    CourseNotFound = 20001,
    CourseCreationFailed = 20002,
    CourseFull = 20003,
    StudentAlreadyAssigned = 20004,
    StudentNotInCourse = 20005,
    MarkOutOfRange = 20006,
    SeatValidationFailed = 20007,
}
