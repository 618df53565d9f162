/// 业务错误码
///
/// 0 表示成功；1xxx 通用；2xxx 认证与用户；3xxx 课程；4xxx 选课；
/// 5xxx 考勤；6xxx 作业；7xxx 成绩。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserEmailInvalid = 2003,
    UserNomorIndukInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserInactive = 2006,
    UserUpdateFailed = 2007,
    UserDeleteFailed = 2008,
    CanNotDeleteCurrentUser = 2009,
    RegisterFailed = 2010,

    MataKuliahNotFound = 3000,
    MataKuliahAlreadyExists = 3001,
    MataKuliahInvalid = 3002,
    NotLecturerOfCourse = 3003,

    KrsNotFound = 4000,
    KrsInvalidTerm = 4001,
    KrsAlreadyRegistered = 4002,
    KrsCreditLimitExceeded = 4003,
    KrsQuotaFull = 4004,
    KrsNotEditable = 4005,
    NotEnrolled = 4006,

    SesiNotFound = 5000,
    SesiAlreadyExists = 5001,
    PresensiWindowClosed = 5002,
    PresensiCodeInvalid = 5003,
    PresensiAlreadyRecorded = 5004,

    TugasNotFound = 6000,
    TugasInvalid = 6001,
    PengumpulanNotFound = 6002,
    PengumpulanDeadlinePassed = 6003,
    PengumpulanAlreadyGraded = 6004,
    PengumpulanInvalid = 6005,

    NilaiInvalid = 7000,
    NilaiNotFound = 7001,
}
